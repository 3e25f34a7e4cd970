use std::collections::HashSet;

/// Immediate children of `parent` that are not named in `excluded`.
///
/// Given the paths `["date.month", "date.time.h", "date.time.m", "name"]`,
/// parent `"date"` and excluded `["month"]`, returns `["date.time"]`: deeper
/// paths collapse into the single child-level path they live under.
///
/// `parent` is matched whole segment by whole segment, so `"date"` does not
/// claim `"dateline.x"`. An empty parent is the document root. Results keep
/// the order in which children first appear in `all_paths`.
pub fn other_child_paths<'a, I>(all_paths: I, parent: &str, excluded: &[&str]) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let parent_segments: Vec<&str> = parent.split('.').filter(|s| !s.is_empty()).collect();
    let depth = parent_segments.len();

    let mut seen = HashSet::new();
    let mut children = Vec::new();

    for path in all_paths {
        let segments: Vec<&str> = path.split('.').collect();
        if segments.len() <= depth || segments[..depth] != parent_segments[..] {
            continue;
        }
        if excluded.contains(&segments[depth]) {
            continue;
        }
        let child = segments[..=depth].join(".");
        if seen.insert(child.clone()) {
            children.push(child);
        }
    }

    children
}
