//! Platform identity database.
//!
//! [`SystemIdentity`] enumerates the user and group records of the host
//! through the C library. The enumeration routines walk global iterators
//! (`getpwent`/`getgrent`), so this source is only safe from one thread at a
//! time - which matches the engine's synchronous, single-threaded contract.

/// The host's real user and group records.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemIdentity;

#[cfg(unix)]
mod unix {
    use std::ffi::{CStr, CString};

    use super::SystemIdentity;
    use crate::models::IdentityDb;

    fn cstr_to_owned(ptr: *const libc::c_char) -> Option<String> {
        if ptr.is_null() {
            return None;
        }
        // Safety: the pointer comes from a passwd/group record the C library
        // just handed out and stays valid until the next *ent call.
        unsafe { CStr::from_ptr(ptr) }.to_str().ok().map(str::to_owned)
    }

    impl IdentityDb for SystemIdentity {
        fn user_names(&self) -> Vec<String> {
            let mut names = Vec::new();
            unsafe {
                libc::setpwent();
                loop {
                    let pw = libc::getpwent();
                    if pw.is_null() {
                        break;
                    }
                    if let Some(name) = cstr_to_owned((*pw).pw_name) {
                        names.push(name);
                    }
                }
                libc::endpwent();
            }
            names
        }

        fn group_names(&self) -> Vec<String> {
            let mut names = Vec::new();
            unsafe {
                libc::setgrent();
                loop {
                    let gr = libc::getgrent();
                    if gr.is_null() {
                        break;
                    }
                    if let Some(name) = cstr_to_owned((*gr).gr_name) {
                        names.push(name);
                    }
                }
                libc::endgrent();
            }
            names
        }

        fn home_of(&self, user: &str) -> Option<String> {
            let name = CString::new(user).ok()?;
            let pw = unsafe { libc::getpwnam(name.as_ptr()) };
            if pw.is_null() {
                return None;
            }
            cstr_to_owned(unsafe { (*pw).pw_dir })
        }
    }
}

#[cfg(not(unix))]
impl crate::models::IdentityDb for SystemIdentity {
    fn user_names(&self) -> Vec<String> {
        Vec::new()
    }

    fn group_names(&self) -> Vec<String> {
        Vec::new()
    }

    fn home_of(&self, _user: &str) -> Option<String> {
        None
    }
}
