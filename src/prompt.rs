use std::env;
use std::io::{self, Write};

use colored::Colorize;

pub struct Prompt {
    user: String,
    host: String,
}

impl Prompt {
    pub fn new() -> Self {
        Self {
            user: whoami::username(),
            host: whoami::fallible::hostname().unwrap_or_else(|_| String::from("localhost")),
        }
    }

    pub fn get_string(&self, last_ok: bool) -> String {
        let cwd = env::current_dir()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|_| String::from("?"));

        let sigil = if last_ok { "$".normal() } else { "$".red() };
        format!(
            "{}@{} {} {} ",
            self.user.green(),
            self.host.green(),
            cwd.blue(),
            sigil
        )
    }

    pub fn display(&self, last_ok: bool) {
        print!("{}", self.get_string(last_ok));
        let _ = io::stdout().flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_shows_cwd() {
        let prompt = Prompt::new();
        let cwd = env::current_dir().unwrap().display().to_string();
        assert!(prompt.get_string(true).contains(&cwd));
    }
}
