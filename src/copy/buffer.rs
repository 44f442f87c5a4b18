use crate::error::CopyError;

// ════════════════════════════════════════════════════════════════════════════
// Scalar / buffer copies
// ════════════════════════════════════════════════════════════════════════════
//
// Every non-empty copy is one fresh allocation sized to the source. Empty
// slices and absent strings come back as `None`.

/// Copy a slice element by element into independent storage.
pub fn copy_slice<T: Clone>(src: &[T]) -> Result<Option<Box<[T]>>, CopyError> {
    if src.is_empty() {
        return Ok(None);
    }
    let mut buf = Vec::new();
    buf.try_reserve_exact(src.len())
        .map_err(|_| CopyError::AllocationFailed {
            bytes: std::mem::size_of_val(src),
        })?;
    buf.extend_from_slice(src);
    Ok(Some(buf.into_boxed_slice()))
}

/// Raw byte payloads.
#[inline]
pub fn copy_bytes(src: &[u8]) -> Result<Option<Box<[u8]>>, CopyError> {
    copy_slice(src)
}

/// An absent string stays absent; a present one, even empty, is copied.
pub fn copy_str(src: Option<&str>) -> Result<Option<Box<str>>, CopyError> {
    src.map(copy_owned_str).transpose()
}

/// String arrays: the array and every string in it are copied.
pub fn copy_strs(src: &[&str]) -> Result<Option<Box<[Box<str>]>>, CopyError> {
    if src.is_empty() {
        return Ok(None);
    }
    let mut out = Vec::new();
    out.try_reserve_exact(src.len())
        .map_err(|_| CopyError::AllocationFailed {
            bytes: src.len() * std::mem::size_of::<Box<str>>(),
        })?;
    for s in src {
        out.push(copy_owned_str(s)?);
    }
    Ok(Some(out.into_boxed_slice()))
}

fn copy_owned_str(src: &str) -> Result<Box<str>, CopyError> {
    let mut buf = String::new();
    buf.try_reserve_exact(src.len())
        .map_err(|_| CopyError::AllocationFailed { bytes: src.len() })?;
    buf.push_str(src);
    Ok(buf.into_boxed_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_slice_is_none() {
        assert!(copy_bytes(&[]).unwrap().is_none());
        assert!(copy_slice::<u64>(&[]).unwrap().is_none());
        assert!(copy_strs(&[]).unwrap().is_none());
    }

    #[test]
    fn test_slice_gets_own_storage() {
        let mut data = vec![7u8; 20];
        let copy = copy_bytes(&data).unwrap().unwrap();
        assert_ne!(copy.as_ptr(), data.as_ptr());
        data.fill(0);
        assert_eq!(copy.len(), 20);
        assert!(copy.iter().all(|b| *b == 7));
    }

    #[test]
    fn test_absent_vs_empty_string() {
        assert!(copy_str(None).unwrap().is_none());
        assert_eq!(copy_str(Some("")).unwrap().as_deref(), Some(""));
        assert_eq!(copy_str(Some("layer")).unwrap().as_deref(), Some("layer"));
    }

    #[test]
    fn test_string_array() {
        let mut names = vec![String::from("a"), String::from("validation")];
        let copy = {
            let refs: Vec<&str> = names.iter().map(String::as_str).collect();
            copy_strs(&refs).unwrap().unwrap()
        };
        names.clear();
        assert_eq!(&*copy[0], "a");
        assert_eq!(&*copy[1], "validation");
    }
}
