use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

pub const INVALID_INPUT: &str = "Please type one of the listed choices.";

/// Source of operator answers
pub trait Prompter {
    /// Show `question` and return the operator's answer without the newline
    fn ask(&mut self, question: &str) -> io::Result<String>;
}

/// Prompter reading from a line-based input and echoing to an output
pub struct ConsolePrompter<R, W> {
    input: R,
    output: W,
}

impl ConsolePrompter<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsolePrompter<R, W> {
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Prompter for ConsolePrompter<R, W> {
    fn ask(&mut self, question: &str) -> io::Result<String> {
        write!(self.output, "{} ", question)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "no answer on input"));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

/// Prompter answering from a fixed queue, for tests and `--no-input` runs
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    pub questions: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            questions: Vec::new(),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&mut self, question: &str) -> io::Result<String> {
        self.questions.push(question.to_string());
        self.answers
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no scripted answer left"))
    }
}

/// Ask until the answer is one of `choices`; returns the matching choice
pub fn choice_dialog<'a>(
    prompter: &mut dyn Prompter,
    question: &str,
    choices: &[&'a str],
    invalid_phrase: &str,
) -> io::Result<&'a str> {
    let prompt = format!("{} ({})", question, choices.join("/"));
    loop {
        let answer = prompter.ask(&prompt)?;
        let answer = answer.trim();
        if let Some(choice) = choices.iter().find(|c| c.eq_ignore_ascii_case(answer)) {
            return Ok(*choice);
        }
        println!("{}", invalid_phrase);
    }
}
