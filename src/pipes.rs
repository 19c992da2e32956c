use nix::unistd::{dup2_stdin, dup2_stdout, fork, pipe, ForkResult};

use crate::exec;

/// Split the argument vector at the first `|`. The pipe token itself is
/// discarded. `None` means the line has no pipeline and the caller falls
/// through to direct execution. A second `|` inside either half is passed
/// through as a literal argument.
pub fn split<'a>(argv: &[&'a str]) -> Option<(Vec<&'a str>, Vec<&'a str>)> {
    let pos = argv.iter().position(|t| *t == "|")?;
    Some((argv[..pos].to_vec(), argv[pos + 1..].to_vec()))
}

/// Run `left | right` as two forked stages joined by an anonymous pipe.
/// Runs inside the already-forked command child: both stages are spawned
/// before either is waited on, and both pipe ends are dropped here once
/// the stages hold their copies. Returns the right stage's exit code.
pub fn run(left: &[&str], right: &[&str]) -> nix::Result<i32> {
    if left.is_empty() || right.is_empty() {
        eprintln!("minish: syntax error near '|'");
        return Ok(2);
    }

    let (read_end, write_end) = pipe()?;

    let left_fork = unsafe { fork() }?;
    let first = match left_fork {
        ForkResult::Child => {
            if let Err(err) = dup2_stdout(&write_end) {
                eprintln!("minish: dup2: {}", err);
                unsafe { libc::_exit(1) }
            }
            drop(write_end);
            drop(read_end);
            let code = exec::exec_stage(left);
            unsafe { libc::_exit(code) }
        }
        ForkResult::Parent { child } => child,
    };

    let second = match unsafe { fork() } {
        Ok(ForkResult::Child) => {
            if let Err(err) = dup2_stdin(&read_end) {
                eprintln!("minish: dup2: {}", err);
                unsafe { libc::_exit(1) }
            }
            drop(read_end);
            drop(write_end);
            let code = exec::exec_stage(right);
            unsafe { libc::_exit(code) }
        }
        Ok(ForkResult::Parent { child }) => Some(child),
        Err(err) => {
            eprintln!("fork: {}", err);
            None
        }
    };

    // the reader only sees EOF once no copy of the write end stays open
    drop(write_end);
    drop(read_end);

    exec::wait_child(first);
    Ok(second.map(exec::wait_child).unwrap_or(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_at_the_pipe_token() {
        let argv = vec!["wc", "-l", "<", "in.txt", "|", "grep", "3"];
        let (left, right) = split(&argv).unwrap();
        assert_eq!(left, vec!["wc", "-l", "<", "in.txt"]);
        assert_eq!(right, vec!["grep", "3"]);
    }

    #[test]
    fn no_pipe_means_no_pipeline() {
        assert!(split(&["ls", "-l"]).is_none());
    }

    #[test]
    fn second_pipe_is_passed_through() {
        let argv = vec!["a", "|", "b", "|", "c"];
        let (left, right) = split(&argv).unwrap();
        assert_eq!(left, vec!["a"]);
        assert_eq!(right, vec!["b", "|", "c"]);
    }
}
