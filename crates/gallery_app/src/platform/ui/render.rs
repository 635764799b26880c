use gallery_core::{Artwork, DetailViewModel, SearchViewModel};

pub fn render_search(view: &SearchViewModel) -> Vec<String> {
    let mut lines = vec![search_status(view)];
    lines.extend(
        view.items
            .iter()
            .enumerate()
            .map(|(index, artwork)| format_row(index + 1, artwork)),
    );
    if !view.items.is_empty() && !view.is_loading && !view.reached_end() {
        lines.push("  (/more for the next page)".to_string());
    }
    lines
}

fn search_status(view: &SearchViewModel) -> String {
    let mut status = if view.query.is_empty() {
        "Search: (none)".to_string()
    } else {
        format!("Search: {:?}", view.query)
    };
    if view.page > 0 {
        match view.total_pages {
            Some(total) => status.push_str(&format!(" | page {} of {}", view.page, total)),
            None => status.push_str(&format!(" | page {}", view.page)),
        }
        status.push_str(&format!(" | {} items", view.items.len()));
    }
    if view.is_loading {
        status.push_str(" | loading...");
    }
    if let Some(error) = &view.error {
        status.push_str(&format!(" | error: {error}"));
    }
    status
}

fn format_row(number: usize, artwork: &Artwork) -> String {
    let title = if artwork.title.is_empty() {
        "Untitled"
    } else {
        artwork.title.as_str()
    };
    if artwork.artist_display.is_empty() {
        format!("{number:>3}. [{}] {title}", artwork.id)
    } else {
        // Artist display often spans lines ("Name\nFrench, 1840-1926").
        let artist = artwork.artist_display.lines().next().unwrap_or_default();
        format!("{number:>3}. [{}] {title} / {artist}", artwork.id)
    }
}

pub fn render_detail(view: &DetailViewModel, iiif_base: &str) -> Vec<String> {
    let mut lines = Vec::new();
    if view.is_loading {
        lines.push("Artwork: loading...".to_string());
    }
    if let Some(error) = &view.error {
        lines.push(format!("Artwork: error: {error} (/reload to try again)"));
    }
    let Some(artwork) = &view.artwork else {
        if lines.is_empty() {
            lines.push("Artwork: (closed)".to_string());
        }
        return lines;
    };

    lines.push(format!("== {} ==", artwork.title));
    push_field(&mut lines, "Artist", &artwork.artist_display);
    push_field(&mut lines, "Date", &artwork.date_display);
    push_field(&mut lines, "Medium", &artwork.medium_display);
    push_field(&mut lines, "Dimensions", &artwork.dimensions);
    push_field(&mut lines, "Type", &artwork.artwork_type_title);
    push_field(&mut lines, "Department", &artwork.department_title);
    if let Some(origin) = &artwork.place_of_origin {
        push_field(&mut lines, "Origin", origin);
    }
    if let Some(gallery) = &artwork.gallery_title {
        push_field(&mut lines, "On view", gallery);
    }
    push_field(&mut lines, "Credit", &artwork.credit_line);
    match artwork.full_image_url(iiif_base) {
        Some(url) => lines.push(format!("  Image: {url}")),
        None => lines.push("  Image: (none)".to_string()),
    }
    lines
}

fn push_field(lines: &mut Vec<String>, label: &str, value: &str) {
    if value.is_empty() {
        return;
    }
    let value = value.replace('\n', "; ");
    lines.push(format!("  {label}: {value}"));
}
