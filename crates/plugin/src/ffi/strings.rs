//! String passing across the C boundary
//!
//! Strings are NUL-terminated UTF-8. Output buffers are caller-owned.

use std::ffi::{c_char, CStr, CString};

use fxrs_engine::HostError;

/// Copy `msg` into a caller buffer, truncating to fit
///
/// # Safety
/// `error` must be null or point to at least `maxlen` writable bytes.
pub(crate) unsafe fn write_error(error: *mut c_char, maxlen: usize, msg: &str) {
    if !error.is_null() && maxlen > 0 {
        let bytes = msg.as_bytes();
        let len = bytes.len().min(maxlen - 1);
        std::ptr::copy_nonoverlapping(bytes.as_ptr(), error as *mut u8, len);
        *error.add(len) = 0;
    }
}

/// Borrow a host string
///
/// # Safety
/// `ptr` must be null or a valid NUL-terminated string that outlives the
/// returned reference.
pub(crate) unsafe fn borrow_str<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok()
}

/// Own a Rust string for handing to the host
pub(crate) fn to_c_string(text: &str) -> Result<CString, HostError> {
    CString::new(text).map_err(|_| HostError::InvalidString(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_error_truncates() {
        let mut buf = [1 as c_char; 6];
        unsafe { write_error(buf.as_mut_ptr(), buf.len(), "too long message") };
        let text = unsafe { CStr::from_ptr(buf.as_ptr()) };
        assert_eq!(text.to_str().unwrap(), "too l");
    }

    #[test]
    fn test_interior_nul_is_rejected() {
        assert_eq!(
            to_c_string("a\0b"),
            Err(HostError::InvalidString("a\0b".to_string()))
        );
        assert!(unsafe { borrow_str(std::ptr::null()) }.is_none());
    }
}
