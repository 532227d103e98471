use unicode_segmentation::UnicodeSegmentation;

pub fn title_case(s: &str) -> String {
    s.split_word_bounds()
        .map(|w| {
            let mut g = w.graphemes(true);
            match g.next() {
                Some(first) => format!("{}{}", first.to_uppercase(), g.as_str().to_lowercase()),
                None => String::new(),
            }
        })
        .collect()
}

/// Join an organization and repository name into a display label
pub fn repo_label(organization: &str, name: &str) -> String {
    if organization.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", organization, name)
    }
}
