//! Well-known weak passwords.

/// Lower-case passwords rejected regardless of their other properties.
pub const WEAK_PASSWORDS: [&str; 23] = [
    "12345678",
    "abcdefgh",
    "password",
    "01234567",
    "qwertyui",
    "abc12345",
    "0123456789",
    "football",
    "passw0rd",
    "123456789",
    "internet",
    "xyz12345",
    "1234567890",
    "einstein",
    "midnight",
    "mountain",
    "baseball",
    "sunshine",
    "princess",
    "superman",
    "qwertyuiop",
    "1q2w3e4r5t",
    "dolphins",
];

/// Length of the longest entry in [`WEAK_PASSWORDS`].
///
/// Longer passwords skip the dictionary lookup.
pub const WEAK_PASSWORD_MAX_LENGTH: usize = 10;

/// Whether `lower_case_password` is a known weak password.
pub fn is_weak(lower_case_password: &str) -> bool {
    WEAK_PASSWORDS.contains(&lower_case_password)
}
