/// Container suffixes recognized by default.
pub const CONTAINER_SUFFIXES: &[&str] = &[".zarr", ".n5"];

/// Split a composite url into a container path, an internal path and the
/// recognized container suffix.
///
/// Exactly one `/`-separated segment of `url` must end with one of
/// `suffixes`; the container path runs up to and including that segment and
/// the internal path is whatever follows (empty if nothing does). All three
/// returned slices borrow from `url`.
///
/// ```
/// use zarrs_cosem::path::split_by_suffix;
///
/// let (container, internal, suffix) = split_by_suffix("s3://0/1/2.n5/3/4", &[".n5"]).unwrap();
/// assert_eq!((container, internal, suffix), ("s3://0/1/2.n5", "3/4", ".n5"));
/// ```
pub fn split_by_suffix<'a>(
    url: &'a str,
    suffixes: &[&str],
) -> crate::Result<(&'a str, &'a str, &'a str)> {
    let mut hit: Option<(usize, usize)> = None; // (container end, suffix len)
    let mut multiple = false;
    let mut offset = 0usize;
    for segment in url.split('/') {
        let end = offset + segment.len();
        if let Some(suffix) = suffixes.iter().find(|&&s| segment.ends_with(s)) {
            if hit.is_some() {
                multiple = true;
            }
            hit = Some((end, suffix.len()));
        }
        offset = end + 1;
    }
    if multiple {
        return Err(crate::Error::AmbiguousContainerSuffix(url.to_string()));
    }
    let Some((end, suffix_len)) = hit else {
        return Err(crate::Error::NoContainerSuffix(url.to_string()));
    };
    let container = &url[..end];
    let internal = url.get(end + 1..).unwrap_or("");
    let suffix = &url[end - suffix_len..end];
    Ok((container, internal, suffix))
}
