//! Camera topic to optical frame naming.

/// Replace the first occurrence of `from` in `text` with `to`.
///
/// Returns `false` and leaves `text` untouched when `from` does not occur.
pub fn replace_first(text: &mut String, from: &str, to: &str) -> bool {
    match text.find(from) {
        Some(start) => {
            text.replace_range(start..start + from.len(), to);
            true
        }
        None => false,
    }
}

/// Optical frame of the camera publishing on `topic`.
///
/// Camera drivers publish as `usb_*` while the transform tree names the
/// optical frame `optical_*`; only the first `usb` is rewritten.
pub fn source_frame_for_topic(topic: &str) -> String {
    let mut frame = topic.to_owned();
    replace_first(&mut frame, "usb", "optical");
    frame
}
