use std::ffi::CString;

use nix::errno::Errno;
use nix::sys::wait::{waitpid, WaitStatus};
use nix::unistd::{execvp, fork, ForkResult, Pid};

use crate::jobs::JobManager;
use crate::pipes;
use crate::redirects;
use crate::signals;

/// Fork and run one command line. The child never returns to the loop: it
/// either becomes the target program or exits with a failure status. The
/// parent waits unless the line was marked background, in which case the
/// child is registered with the job table and the prompt comes straight
/// back. Returns the foreground exit code, if there was a foreground wait.
pub fn run_command(
    argv: &[&str],
    background: bool,
    command: &str,
    jobs: &mut JobManager,
) -> Option<i32> {
    match unsafe { fork() } {
        Ok(ForkResult::Child) => {
            signals::reset_for_child();
            let code = match pipes::split(argv) {
                Some((left, right)) => pipes::run(&left, &right).unwrap_or_else(|err| {
                    eprintln!("minish: pipe: {}", err);
                    1
                }),
                None => exec_stage(argv),
            };
            unsafe { libc::_exit(code) }
        }
        Ok(ForkResult::Parent { child }) => {
            if background {
                jobs.register(child, command);
                None
            } else {
                Some(wait_foreground(child))
            }
        }
        Err(err) => {
            // not fatal for the shell, the next prompt comes up anyway
            eprintln!("fork: {}", err);
            None
        }
    }
}

/// Apply this stage's redirections and replace the process image. Returns
/// only on failure, with the code the child should exit with.
pub fn exec_stage(argv: &[&str]) -> i32 {
    let mut argv = argv.to_vec();

    let redirects = match redirects::extract(&mut argv) {
        Ok(redirects) => redirects,
        Err(err) => {
            eprintln!("minish: {}", err);
            return 1;
        }
    };
    if let Err(err) = redirects::apply(&redirects) {
        eprintln!("minish: {}", err);
        return 1;
    }

    let Some(&program) = argv.first() else {
        // nothing left after stripping redirections
        return 0;
    };
    let args = match argv
        .iter()
        .map(|arg| CString::new(*arg))
        .collect::<Result<Vec<CString>, _>>()
    {
        Ok(args) => args,
        Err(_) => {
            eprintln!("minish: argument contains a NUL byte");
            return 1;
        }
    };

    let err = match execvp(&args[0], &args) {
        Err(err) => err,
        Ok(never) => match never {},
    };
    eprintln!("{}: {}", program, err);
    if err == Errno::ENOENT {
        127
    } else {
        126
    }
}

/// EINTR-safe wait for one child; a signal death counts as exit code 1.
pub fn wait_child(pid: Pid) -> i32 {
    loop {
        match waitpid(pid, None) {
            Ok(WaitStatus::Exited(_, code)) => return code,
            Ok(WaitStatus::Signaled(..)) => return 1,
            Ok(_) => continue,
            Err(Errno::EINTR) => continue,
            Err(err) => {
                eprintln!("wait: {}", err);
                return 1;
            }
        }
    }
}

/// Block until the foreground child terminates. Its pid is published for
/// the signal handlers before the first wait and cleared after the last.
fn wait_foreground(child: Pid) -> i32 {
    signals::set_foreground(child);
    let code = wait_child(child);
    signals::clear_foreground();
    code
}
