// This file is part of mash, a small POSIX shell.
// Copyright (C) 2026 WATANABE Yuki
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Redirection evaluation.
//!
//! A redirection modifies one file descriptor: the explicit IO_NUMBER, or
//! the operator's default (standard input for input operators, standard
//! output for output operators). File redirections open the target and
//! `dup2` it onto the descriptor; `<&` and `>&` copy another descriptor, or
//! close the descriptor when the operand is `-`.
//!
//! Most redirections run in a process that is about to `exec` or exit, so
//! nothing needs undoing. A function call is the exception: its
//! redirections apply to the current shell process for the duration of the
//! call, so the original descriptors are saved above [`MIN_INTERNAL_FD`]
//! first and restored afterwards.

use crate::expansion::expand_words;
use crate::{Error, Result};
use mash_env::io::{Fd, MIN_INTERNAL_FD};
use mash_env::system::{Errno, Mode, OFlag};
use mash_env::Env;
use mash_syntax::syntax::{Redir, RedirOp};
use std::ffi::CString;

/// Original descriptors saved while redirections are in effect
///
/// Pass a `SavedFds` to [`perform_redirs`] to make the redirections
/// undoable, then hand it to [`restore_fds`] when the scope ends.
#[derive(Debug, Default)]
pub struct SavedFds(Vec<(Fd, Option<Fd>)>);

/// Performs redirections in the current process.
///
/// With `saved`, every modified descriptor is first saved so that
/// [`restore_fds`] can undo the redirections. Without it, the redirections
/// are permanent, which is what a forked child wants.
pub fn perform_redirs(
    env: &mut Env,
    redirs: &[Redir],
    mut saved: Option<&mut SavedFds>,
) -> Result<()> {
    for redir in redirs {
        perform_redir(env, redir, saved.as_deref_mut())?;
    }
    Ok(())
}

/// Undoes redirections performed with [`perform_redirs`].
///
/// Descriptors are restored in reverse order of modification. A descriptor
/// that was closed at save time is closed again.
pub fn restore_fds(env: &mut Env, saved: SavedFds) {
    for (target, copy) in saved.0.into_iter().rev() {
        match copy {
            Some(copy) => {
                let _ = env.system.dup2(copy, target);
                let _ = env.system.close(copy);
            }
            None => {
                let _ = env.system.close(target);
            }
        }
    }
}

fn perform_redir(env: &mut Env, redir: &Redir, saved: Option<&mut SavedFds>) -> Result<()> {
    let target = Fd(redir.fd_or_default());

    let mut fields = expand_words(env, std::slice::from_ref(&redir.operand))?;
    if fields.len() != 1 {
        return Err(Error::AmbiguousRedirect(redir.operand.to_string()));
    }
    let operand = fields.pop().expect("exactly one field");

    if let Some(saved) = saved {
        match env.system.dup_save(target, MIN_INTERNAL_FD) {
            Ok(copy) => saved.0.push((target, Some(copy))),
            Err(Errno::EBADF) => saved.0.push((target, None)),
            Err(errno) => return Err(Error::Dup(errno)),
        }
    }

    match redir.op {
        RedirOp::FdIn | RedirOp::FdOut => {
            if operand == "-" {
                env.system.close(target).map_err(Error::Dup)?;
            } else {
                let source = operand
                    .parse()
                    .map_err(|_| Error::BadFdOperand(operand.clone()))?;
                env.system.dup2(Fd(source), target).map_err(Error::Dup)?;
            }
        }
        op => {
            let path = CString::new(operand.clone()).map_err(|_| Error::NulByte)?;
            let fd = env
                .system
                .open(&path, open_flags(op), Mode::from_bits_truncate(0o666))
                .map_err(|errno| Error::OpenRedirect {
                    target: operand,
                    errno,
                })?;
            if fd != target {
                env.system.dup2(fd, target).map_err(Error::Dup)?;
                let _ = env.system.close(fd);
            }
        }
    }

    Ok(())
}

/// Returns the open flags the operator implies.
fn open_flags(op: RedirOp) -> OFlag {
    match op {
        RedirOp::FileIn => OFlag::O_RDONLY,
        RedirOp::FileInOut => OFlag::O_RDWR | OFlag::O_CREAT,
        RedirOp::FileOut | RedirOp::FileClobber => {
            OFlag::O_WRONLY | OFlag::O_CREAT | OFlag::O_TRUNC
        }
        RedirOp::FileAppend => OFlag::O_WRONLY | OFlag::O_CREAT | OFlag::O_APPEND,
        RedirOp::FdIn | RedirOp::FdOut => unreachable!("not a file redirection"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mash_env::RealSystem;
    use mash_syntax::syntax::Word;

    fn env() -> Env {
        // SAFETY: these tests do not fork.
        Env::with_system(unsafe { RealSystem::new() })
    }

    fn redir(fd: Option<i32>, op: RedirOp, operand: &str) -> Redir {
        Redir {
            fd,
            op,
            operand: Word::with_str(operand),
        }
    }

    #[test]
    fn ambiguous_redirect() {
        let mut env = env();
        env.variables.assign("two", "a b");
        let e = perform_redirs(&mut env, &[redir(None, RedirOp::FileOut, "$two")], None)
            .unwrap_err();
        assert_eq!(e, Error::AmbiguousRedirect("$two".to_string()));

        let e = perform_redirs(&mut env, &[redir(None, RedirOp::FileOut, "$unset")], None)
            .unwrap_err();
        assert_eq!(e, Error::AmbiguousRedirect("$unset".to_string()));
    }

    #[test]
    fn bad_fd_operand() {
        let mut env = env();
        let e = perform_redirs(&mut env, &[redir(Some(9), RedirOp::FdOut, "x")], None)
            .unwrap_err();
        assert_eq!(e, Error::BadFdOperand("x".to_string()));
    }

    #[test]
    fn open_failure_reports_target() {
        let mut env = env();
        let e = perform_redirs(
            &mut env,
            &[redir(Some(9), RedirOp::FileIn, "/no/such/file/here")],
            None,
        )
        .unwrap_err();
        assert_eq!(
            e,
            Error::OpenRedirect {
                target: "/no/such/file/here".to_string(),
                errno: Errno::ENOENT,
            }
        );
    }

    #[test]
    fn file_redirection_on_high_fd_with_save_and_restore() {
        let mut env = env();
        let dir = std::env::temp_dir();
        let path = dir.join(format!("mash-redir-test-{}", env.system.getpid()));
        let path_str = path.to_str().unwrap();

        let mut saved = SavedFds::default();
        perform_redirs(
            &mut env,
            &[redir(Some(9), RedirOp::FileOut, path_str)],
            Some(&mut saved),
        )
        .unwrap();

        env.system.write_all(Fd(9), b"out").unwrap();
        restore_fds(&mut env, saved);

        // fd 9 was not open before, so the restore closed it again
        assert_eq!(
            env.system.write(Fd(9), b"x").unwrap_err(),
            Errno::EBADF
        );

        assert_eq!(std::fs::read(&path).unwrap(), b"out");
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn fd_duplication_and_close() {
        let mut env = env();
        let (reader, writer) = env.system.pipe().unwrap();

        // 9>&writer then write through fd 9
        perform_redirs(
            &mut env,
            &[redir(Some(9), RedirOp::FdOut, &writer.to_string())],
            None,
        )
        .unwrap();
        env.system.write_all(Fd(9), b"hi").unwrap();

        // 9>&- closes it
        perform_redirs(&mut env, &[redir(Some(9), RedirOp::FdOut, "-")], None).unwrap();
        assert_eq!(env.system.write(Fd(9), b"x").unwrap_err(), Errno::EBADF);

        let mut buffer = [0; 8];
        let count = env.system.read(reader, &mut buffer).unwrap();
        assert_eq!(&buffer[..count], b"hi");

        let _ = env.system.close(reader);
        let _ = env.system.close(writer);
    }
}
