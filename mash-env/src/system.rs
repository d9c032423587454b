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

//! Interface to the underlying operating system.
//!
//! [`RealSystem`] wraps every host primitive the shell drives: pipes,
//! descriptor duplication, file opening, forking, waiting, and program
//! execution. All `nix` calls live here; the rest of the shell consumes the
//! re-exported [`Errno`], [`OFlag`], and [`Mode`] types and never talks to
//! `nix` directly. Calls that POSIX allows to fail with `EINTR` are retried
//! at this layer.

use crate::io::Fd;
use std::convert::Infallible;
use std::ffi::{CStr, CString};
use std::path::PathBuf;

pub use nix::errno::Errno;
pub use nix::fcntl::OFlag;
pub use nix::sys::stat::Mode;
pub use nix::sys::wait::WaitStatus;
pub use nix::unistd::{ForkResult, Pid};

/// Result of a system call
pub type Result<T> = nix::Result<T>;

/// Interface to the real operating system
///
/// This is a zero-sized handle; all state lives in the kernel. The handle
/// exists so that every system interaction is an explicit call on the
/// environment, which keeps descriptor hygiene visible at the call site.
#[derive(Debug)]
pub struct RealSystem(());

impl RealSystem {
    /// Returns an instance of `RealSystem`.
    ///
    /// # Safety
    ///
    /// This function is marked `unsafe` because improper use of
    /// `RealSystem` may lead to undefined behavior. Most operations the
    /// shell performs on the system are not thread-safe, notably `fork`.
    /// You should never use `RealSystem` in a multi-threaded program, and
    /// it is your responsibility to make sure you are using only one
    /// instance in the process.
    pub unsafe fn new() -> RealSystem {
        RealSystem(())
    }

    /// Creates a pipe, returning the reading and writing ends.
    pub fn pipe(&mut self) -> Result<(Fd, Fd)> {
        nix::unistd::pipe().map(|(reader, writer)| (Fd(reader), Fd(writer)))
    }

    /// Duplicates `from` into `to`, closing whatever `to` was before.
    pub fn dup2(&mut self, from: Fd, to: Fd) -> Result<Fd> {
        loop {
            match nix::unistd::dup2(from.0, to.0) {
                Err(Errno::EINTR) => (),
                other => return other.map(Fd),
            }
        }
    }

    /// Duplicates `from` to the lowest free descriptor at or above
    /// `to_min`, with the close-on-exec flag set.
    ///
    /// This is how the shell saves a descriptor it is about to redirect so
    /// the original can be restored later.
    pub fn dup_save(&mut self, from: Fd, to_min: Fd) -> Result<Fd> {
        use nix::fcntl::FcntlArg::F_DUPFD_CLOEXEC;
        nix::fcntl::fcntl(from.0, F_DUPFD_CLOEXEC(to_min.0)).map(Fd)
    }

    /// Opens a file.
    pub fn open(&mut self, path: &CStr, option: OFlag, mode: Mode) -> Result<Fd> {
        nix::fcntl::open(path, option, mode).map(Fd)
    }

    /// Closes a file descriptor.
    ///
    /// Closing an already-closed descriptor is not an error.
    pub fn close(&mut self, fd: Fd) -> Result<()> {
        loop {
            match nix::unistd::close(fd.0) {
                Err(Errno::EBADF) => return Ok(()),
                Err(Errno::EINTR) => (),
                other => return other,
            }
        }
    }

    /// Reads from a file descriptor.
    pub fn read(&mut self, fd: Fd, buffer: &mut [u8]) -> Result<usize> {
        loop {
            let result = nix::unistd::read(fd.0, buffer);
            if result != Err(Errno::EINTR) {
                return result;
            }
        }
    }

    /// Writes to a file descriptor.
    pub fn write(&mut self, fd: Fd, buffer: &[u8]) -> Result<usize> {
        loop {
            let result = nix::unistd::write(fd.0, buffer);
            if result != Err(Errno::EINTR) {
                return result;
            }
        }
    }

    /// Writes the whole buffer to a file descriptor, retrying partial
    /// writes.
    pub fn write_all(&mut self, fd: Fd, mut buffer: &[u8]) -> Result<()> {
        while !buffer.is_empty() {
            let count = self.write(fd, buffer)?;
            buffer = &buffer[count..];
        }
        Ok(())
    }

    /// Tests if a file descriptor is associated with a terminal device.
    ///
    /// On error, this function simply returns `false`; POSIX does not
    /// require `isatty` to report why it failed.
    #[must_use]
    pub fn isatty(&self, fd: Fd) -> bool {
        nix::unistd::isatty(fd.0).unwrap_or(false)
    }

    /// Returns the process ID of the current process.
    #[must_use]
    pub fn getpid(&self) -> Pid {
        nix::unistd::getpid()
    }

    /// Changes the working directory.
    pub fn chdir(&mut self, path: &CStr) -> Result<()> {
        nix::unistd::chdir(path)
    }

    /// Creates a new child process.
    ///
    /// This function returns in both the parent and the child; examine the
    /// [`ForkResult`] to tell which process you are in. The child inherits
    /// a snapshot of the whole environment, which is exactly how a subshell
    /// isolates its effects.
    pub fn fork(&mut self) -> Result<ForkResult> {
        // SAFETY: As stated on RealSystem::new, the caller is responsible
        // for keeping the process single-threaded, in which case fork is
        // safe to call.
        unsafe { nix::unistd::fork() }
    }

    /// Waits for a child process to terminate and returns its status.
    pub fn wait(&mut self, target: Pid) -> Result<WaitStatus> {
        loop {
            let result = nix::sys::wait::waitpid(target, None);
            if result != Err(Errno::EINTR) {
                return result;
            }
        }
    }

    /// Replaces the current process image, searching `PATH` for `name`.
    ///
    /// The environment of the new image is `envs`, which also supplies the
    /// `PATH` that is searched. On success this function does not return.
    pub fn execvpe(
        &mut self,
        name: &CStr,
        args: &[CString],
        envs: &[CString],
    ) -> Result<Infallible> {
        loop {
            let result = nix::unistd::execvpe(name, args, envs);
            if result != Err(Errno::EINTR) {
                return result;
            }
        }
    }

    /// Looks up the home directory of a user, for tilde expansion.
    ///
    /// Returns `None` if the user does not exist or the lookup fails.
    #[must_use]
    pub fn user_home_dir(&self, name: &str) -> Option<PathBuf> {
        nix::unistd::User::from_name(name).ok()?.map(|user| user.dir)
    }
}
