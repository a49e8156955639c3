use manage_artists::{ListView, EMPTY_MESSAGE, LIST_TITLE};

pub fn table(view: &ListView<'_>) {
    println!();
    println!("== {LIST_TITLE} ==");
    if !view.search.is_empty() {
        println!("search: \"{}\"", view.search);
    }

    if view.loading {
        println!("  ... loading");
        return;
    }
    if view.show_empty_message {
        println!("  {EMPTY_MESSAGE}");
    }

    let offset = view.first;
    for (idx, artist) in view.rows.iter().enumerate() {
        println!(
            "  {:>2}. {:<40} (#{}, {})",
            idx + 1,
            artist.name,
            artist.id_artist,
            offset + idx as u64 + 1
        );
    }
    println!(
        "page {}/{} ({} records, {} per page)",
        view.page,
        view.page_count.max(1),
        view.total_records,
        view.page_size
    );
}
