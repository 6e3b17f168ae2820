/// Build the output file name for an essay: `{index} {date} {title}.md`
/// with `/` replaced by `&` and spaces replaced by `_`.
///
/// `index` is the 1-based position in the listing, counted before any
/// essay is skipped.
pub fn output_file_name(index: usize, date: &str, title: &str) -> String {
    let stem = format!("{index} {} {title}", date.trim());
    format!("{}.md", stem.replace('/', "&").replace(' ', "_"))
}
