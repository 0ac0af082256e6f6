use std::num::NonZero;

/// Largest length a host may supply for any window parameter.
pub const MAX_LENGTH: i64 = 2_147_483_647;

/// Invalid indicator configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A builder was finished without setting its window length.
    #[error("{name} is required")]
    MissingLength { name: &'static str },

    /// A host-supplied length fell outside `[1, MAX_LENGTH]`.
    #[error("{name} must be within [1, 2147483647], got {value}")]
    LengthOutOfRange { name: &'static str, value: i64 },
}

/// Validates an integer length parameter coming from the host.
pub(crate) fn length_from_input(
    name: &'static str,
    value: i64,
) -> Result<NonZero<usize>, ConfigError> {
    if !(1..=MAX_LENGTH).contains(&value) {
        return Err(ConfigError::LengthOutOfRange { name, value });
    }

    usize::try_from(value)
        .ok()
        .and_then(NonZero::new)
        .ok_or(ConfigError::LengthOutOfRange { name, value })
}
