// Naming and content validation used by the install validator

use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

use crate::utils::error::{Result, SetupError};

/// Module names a project directory must not shadow.
///
/// Python standard library top-level modules plus the packages an Askbot
/// site imports at startup.
pub const RESERVED_MODULE_NAMES: &[&str] = &[
    // askbot runtime
    "askbot", "django", "celery", "kombu", "jinja2", "coffin", "compressor",
    "robots", "keyedcache", "livesettings", "akismet", "bs4", "html5lib",
    "markdown2", "mock", "oauth2", "openid", "pystache", "pytz", "requests",
    "responses", "south", "tinymce", "unidecode", "yaml",
    // python standard library
    "__future__", "abc", "aifc", "argparse", "array", "ast", "asynchat",
    "asyncio", "asyncore", "atexit", "audioop", "base64", "bdb", "binascii",
    "bisect", "builtins", "bz2", "calendar", "cgi", "cgitb", "chunk", "cmath",
    "cmd", "code", "codecs", "codeop", "collections", "colorsys", "compileall",
    "concurrent", "configparser", "contextlib", "contextvars", "copy",
    "copyreg", "cprofile", "crypt", "csv", "ctypes", "curses", "dataclasses",
    "datetime", "dbm", "decimal", "difflib", "dis", "doctest", "email",
    "encodings", "ensurepip", "enum", "errno", "faulthandler", "fcntl",
    "filecmp", "fileinput", "fnmatch", "fractions", "ftplib", "functools",
    "gc", "getopt", "getpass", "gettext", "glob", "graphlib", "grp", "gzip",
    "hashlib", "heapq", "hmac", "html", "http", "idlelib", "imaplib",
    "imghdr", "imp", "importlib", "inspect", "io", "ipaddress", "itertools",
    "json", "keyword", "lib2to3", "linecache", "locale", "logging", "lzma",
    "mailbox", "mailcap", "marshal", "math", "mimetypes", "mmap",
    "modulefinder", "msilib", "msvcrt", "multiprocessing", "netrc", "nis",
    "nntplib", "numbers", "operator", "optparse", "os", "ossaudiodev",
    "pathlib", "pdb", "pickle", "pickletools", "pipes", "pkgutil", "platform",
    "plistlib", "poplib", "posix", "pprint", "profile", "pstats", "pty",
    "pwd", "py_compile", "pyclbr", "pydoc", "queue", "quopri", "random", "re",
    "readline", "reprlib", "resource", "rlcompleter", "runpy", "sched",
    "secrets", "select", "selectors", "shelve", "shlex", "shutil", "signal",
    "site", "smtpd", "smtplib", "sndhdr", "socket", "socketserver", "spwd",
    "sqlite3", "ssl", "stat", "statistics", "string", "stringprep", "struct",
    "subprocess", "sunau", "symtable", "sys", "sysconfig", "syslog",
    "tabnanny", "tarfile", "telnetlib", "tempfile", "termios", "test",
    "textwrap", "threading", "time", "timeit", "tkinter", "token", "tokenize",
    "tomllib", "trace", "traceback", "tracemalloc", "tty", "turtle",
    "turtledemo", "types", "typing", "unicodedata", "unittest", "urllib",
    "uu", "uuid", "venv", "warnings", "wave", "weakref", "webbrowser",
    "winreg", "winsound", "wsgiref", "xdrlib", "xml", "xmlrpc", "zipapp",
    "zipfile", "zipimport", "zlib", "zoneinfo",
];

fn project_dir_name_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[_a-zA-Z][A-Za-z0-9_-]*$").expect("valid regex"))
}

fn django_import_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(?:from django.*import|import django)").expect("valid regex"))
}

/// Base name of `path` as a string, empty when there is none
pub fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// True when `name` may be used as a Django project directory
pub fn is_valid_project_dir_name(name: &str) -> bool {
    project_dir_name_re().is_match(name)
}

/// Case-insensitive lookup in [`RESERVED_MODULE_NAMES`]
pub fn is_reserved_module_name(name: &str) -> bool {
    RESERVED_MODULE_NAMES
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(name))
}

/// True when `line` imports from django at module level
pub fn is_django_import(line: &str) -> bool {
    django_import_re().is_match(line)
}

/// Validate the public site URL used as the Akismet `blog` identifier
pub fn validate_app_url(url: &str) -> Result<()> {
    if url.trim().is_empty() {
        return Err(SetupError::ConfigError(
            "site.app_url cannot be empty when Akismet is enabled.\n\nExample:\n  [site]\n  app_url = \"https://askbot.example.com/\"".to_string()
        ));
    }
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(SetupError::ConfigError(format!(
            "site.app_url '{}' must start with http:// or https://",
            url
        )));
    }
    Ok(())
}
