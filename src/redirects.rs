use std::fs::{File, OpenOptions};
use std::io;

use nix::unistd::{dup2_stdin, dup2_stdout};

/// A single parsed redirection, holding its target path as a slice of the
/// command line.
#[derive(Debug, PartialEq)]
pub enum Redirect<'a> {
    Input(&'a str),
    Output(&'a str),
    Append(&'a str),
}

/// Scan the argument vector for `<`, then `>`, then `>>`. Each class is
/// honored at most once, leftmost occurrence first; the operator and its
/// filename are removed from the vector so exec never sees them. An
/// operator without a following token is an error.
pub fn extract<'a>(argv: &mut Vec<&'a str>) -> io::Result<Vec<Redirect<'a>>> {
    let mut redirects = Vec::new();
    for op in ["<", ">", ">>"] {
        let Some(pos) = argv.iter().position(|t| *t == op) else {
            continue;
        };
        let Some(target) = argv.get(pos + 1).copied() else {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("expected filename after '{op}'"),
            ));
        };
        argv.drain(pos..=pos + 1);
        redirects.push(match op {
            "<" => Redirect::Input(target),
            ">" => Redirect::Output(target),
            _ => Redirect::Append(target),
        });
    }
    Ok(redirects)
}

/// Open each target and remap this process's standard streams. Runs in a
/// forked child only; the opened descriptor is closed after duplication
/// when the `File` drops.
pub fn apply(redirects: &[Redirect<'_>]) -> io::Result<()> {
    for redirect in redirects {
        match redirect {
            Redirect::Input(path) => {
                let file = File::open(path).map_err(|e| annotate(path, e))?;
                dup2_stdin(&file)?;
            }
            Redirect::Output(path) => {
                let file = OpenOptions::new()
                    .write(true)
                    .create(true)
                    .truncate(true)
                    .open(path)
                    .map_err(|e| annotate(path, e))?;
                dup2_stdout(&file)?;
            }
            Redirect::Append(path) => {
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(|e| annotate(path, e))?;
                dup2_stdout(&file)?;
            }
        }
    }
    Ok(())
}

fn annotate(path: &str, err: io::Error) -> io::Error {
    io::Error::new(err.kind(), format!("{path}: {err}"))
}
