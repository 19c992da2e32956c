use std::collections::HashMap;

use nix::errno::Errno;
use nix::sys::wait::{waitpid, WaitPidFlag, WaitStatus};
use nix::unistd::Pid;

#[derive(Debug)]
pub struct Job {
    pub id: u32,
    pub pid: Pid,
    pub command: String,
}

/// Table of detached background children. Foreground children are waited
/// on directly by the supervisor and never appear here.
pub struct JobManager {
    jobs: HashMap<u32, Job>,
    next_id: u32,
}

impl JobManager {
    pub fn new() -> Self {
        JobManager {
            jobs: HashMap::new(),
            next_id: 1,
        }
    }

    /// Register a spawned background child and acknowledge it.
    pub fn register(&mut self, pid: Pid, command: &str) -> u32 {
        let id = self.next_id;
        self.next_id += 1;

        self.jobs.insert(
            id,
            Job {
                id,
                pid,
                command: command.to_string(),
            },
        );
        println!("[{}] {}", id, pid);
        id
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Collect every child that has terminated, without blocking. Each
    /// completed job is reported exactly once and dropped from the table.
    pub fn reap_finished(&mut self) {
        let any_child = Pid::from_raw(-1);
        loop {
            match waitpid(any_child, Some(WaitPidFlag::WNOHANG)) {
                Ok(WaitStatus::StillAlive) => break,
                Ok(status) => match status.pid() {
                    Some(pid) => self.report_done(pid, &status),
                    None => break,
                },
                // nothing left to collect
                Err(Errno::ECHILD) => break,
                Err(err) => {
                    eprintln!("wait: {}", err);
                    break;
                }
            }
        }
    }

    fn report_done(&mut self, pid: Pid, status: &WaitStatus) {
        if !matches!(
            status,
            WaitStatus::Exited(..) | WaitStatus::Signaled(..)
        ) {
            return;
        }
        let Some(id) = self.jobs.values().find(|j| j.pid == pid).map(|j| j.id) else {
            return;
        };
        if let Some(job) = self.jobs.remove(&id) {
            match status {
                WaitStatus::Exited(_, code) => {
                    println!("[{}] Done {} (exit: {})", job.id, job.command, code);
                }
                WaitStatus::Signaled(_, signal, _) => {
                    println!("[{}] Done {} (signal: {})", job.id, job.command, signal);
                }
                _ => {}
            }
        }
    }
}
