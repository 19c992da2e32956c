use std::env;
use std::io;

use colored::Colorize;

use crate::exec;
use crate::jobs::JobManager;
use crate::prompt::Prompt;
use crate::signals;
use crate::tokenizer;

pub struct Shell {
    prompt: Prompt,
    jobs: JobManager,
    last_status: i32,
    running: bool,
}

impl Shell {
    pub fn new() -> Self {
        if let Ok(exe_path) = env::current_exe() {
            env::set_var("SHELL", exe_path.to_string_lossy().to_string());
        }

        Self {
            prompt: Prompt::new(),
            jobs: JobManager::new(),
            last_status: 0,
            running: true,
        }
    }

    pub fn run(&mut self) {
        println!("Welcome to {}!", "minish".bold());
        println!("Type 'exit' to quit\n");

        if let Err(err) = signals::install() {
            eprintln!("minish: failed to install signal handlers: {}", err);
        }

        let stdin = io::stdin();
        while self.running {
            self.service_pending_signal();
            // collect children that finished while we were busy or idle
            if signals::take_child_event() {
                self.jobs.reap_finished();
            }

            self.prompt.display(self.last_status == 0);

            let mut line = String::new();
            match stdin.read_line(&mut line) {
                Ok(0) => {
                    // end of input
                    println!();
                    break;
                }
                Ok(_) => self.dispatch(&line),
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => {
                    eprintln!("Error reading input: {}", err);
                    break;
                }
            }
        }
    }

    fn dispatch(&mut self, line: &str) {
        let line = line.trim_end_matches(['\n', '\r']);

        if line == "exit" {
            println!("Goodbye!");
            self.running = false;
            return;
        }

        let tokens = match tokenizer::tokenize(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                eprintln!("minish: {}", err);
                return;
            }
        };
        if tokens.argv.is_empty() {
            return;
        }

        if tokens.argv[0] == "cd" {
            self.builtin_cd(&tokens.argv);
            return;
        }

        if let Some(status) =
            exec::run_command(&tokens.argv, tokens.background, line.trim(), &mut self.jobs)
        {
            self.last_status = status;
        }
    }

    /// `cd` must run in the shell process itself; a forked child's working
    /// directory change would die with it.
    fn builtin_cd(&mut self, argv: &[&str]) {
        match argv.get(1) {
            None => eprintln!("cd: missing argument"),
            Some(path) => {
                if let Err(err) = env::set_current_dir(path) {
                    eprintln!("cd: {}: {}", path, err);
                }
            }
        }
    }

    fn service_pending_signal(&self) {
        if let Some(signal) = signals::take_pending_signal() {
            println!("({} received)", signal);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cd_to_missing_path_keeps_cwd() {
        let mut shell = Shell::new();
        let before = env::current_dir().unwrap();
        shell.builtin_cd(&["cd", "/definitely/not/a/real/path"]);
        assert_eq!(env::current_dir().unwrap(), before);
    }

    #[test]
    fn cd_without_argument_is_rejected() {
        let mut shell = Shell::new();
        let before = env::current_dir().unwrap();
        shell.builtin_cd(&["cd"]);
        assert_eq!(env::current_dir().unwrap(), before);
    }

    #[test]
    fn literal_exit_stops_the_loop() {
        let mut shell = Shell::new();
        shell.dispatch("exit\n");
        assert!(!shell.running);
    }

    #[test]
    fn blank_line_is_a_no_op() {
        let mut shell = Shell::new();
        shell.dispatch(" \t \n");
        assert!(shell.running);
        assert_eq!(shell.last_status, 0);
    }
}
