#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStyle {
    Plain,
    Italic,
    Bold,
}

impl RunStyle {
    pub fn css(&self) -> Option<&'static str> {
        match self {
            RunStyle::Plain => None,
            RunStyle::Italic => Some("font-style:italic"),
            RunStyle::Bold => Some("font-weight:bold"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub text: String,
    pub style: RunStyle,
}

impl Run {
    pub fn new(text: &str, style: RunStyle) -> Self {
        Run {
            text: text.to_owned(),
            style,
        }
    }
}

// 同じ装飾の run が隣り合ったら 1 つにまとめる
pub struct RunList {
    runs: Vec<Run>,
}

impl RunList {
    pub fn new() -> Self {
        RunList { runs: Vec::new() }
    }

    pub fn push(&mut self, text: &str, style: RunStyle) {
        if text.is_empty() {
            return;
        }

        match self.runs.last_mut() {
            Some(last) if last.style == style => last.text.push_str(text),
            _ => self.runs.push(Run::new(text, style)),
        }
    }

    pub fn extend(&mut self, runs: Vec<Run>) {
        for run in runs {
            self.push(&run.text, run.style);
        }
    }

    pub fn into_runs(self) -> Vec<Run> {
        self.runs
    }
}

impl Default for RunList {
    fn default() -> Self {
        Self::new()
    }
}

pub fn concat_runs(runs: &[Run]) -> String {
    runs.iter().map(|run| run.text.as_str()).collect()
}
