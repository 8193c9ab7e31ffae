use crossterm::style::{StyledContent, Stylize};

/// True if `haystack` contains any of `keywords` (case-sensitive).
pub fn contains_any<S: AsRef<str>>(haystack: &str, keywords: &[S]) -> bool {
    keywords.iter().any(|k| haystack.contains(k.as_ref()))
}

/// Where console narration goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Narration {
    Stdout,
    Stderr,
    Off,
}

/// Colored, human-readable narration of each check as it runs. This is
/// separate from tracing and from the returned results.
#[derive(Debug, Clone, Copy)]
pub struct Console {
    target: Narration,
}

impl Console {
    pub fn new(target: Narration) -> Self {
        Self { target }
    }

    pub fn silent() -> Self {
        Self::new(Narration::Off)
    }

    pub fn namespace(&self, namespace: &str) {
        self.emit(format!("Namespace: {}", namespace).yellow());
    }

    pub fn healthy(&self, line: String) {
        self.emit(line.green());
    }

    pub fn unhealthy(&self, line: String) {
        self.emit(line.red());
    }

    fn emit(&self, line: StyledContent<String>) {
        match self.target {
            Narration::Stdout => println!("{}", line),
            Narration::Stderr => eprintln!("{}", line),
            Narration::Off => {}
        }
    }
}
