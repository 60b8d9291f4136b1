use super::ArenaError;

/// Byte size of `count` elements of `elem_size` bytes each.
pub fn array_size(count: usize, elem_size: usize) -> Result<usize, ArenaError> {
    count
        .checked_mul(elem_size)
        .ok_or(ArenaError::SizeOverflow { count, elem_size })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_array_size() {
        assert_eq!(array_size(10, 4), Ok(40));
        assert_eq!(array_size(0, usize::MAX), Ok(0));
    }

    #[test]
    fn test_array_size_overflow() {
        assert_eq!(
            array_size(usize::MAX, 2),
            Err(ArenaError::SizeOverflow {
                count: usize::MAX,
                elem_size: 2
            })
        );
    }
}
