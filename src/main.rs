/// Native entry point: print the persisted gallery
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use keepsake::storage::FileStore;
    use keepsake::{Gallery, GalleryConfig};

    let config = GalleryConfig::load_or_create_default();

    env_logger::Builder::from_default_env()
        .filter_level(config.log_level.to_level_filter())
        .init();

    let Some(dir) = FileStore::default_dir() else {
        eprintln!("Application error: could not determine a data directory");
        std::process::exit(1);
    };
    log::debug!("Using data directory {:?}", dir);

    let gallery = Gallery::open(FileStore::new(dir), &config);

    if gallery.is_empty() {
        println!("No memories yet.");
        return;
    }

    println!("{} memories", gallery.len());
    for (index, photo) in gallery.photos().iter().enumerate() {
        println!(
            "{:>3}. {} [{}] {}",
            index + 1,
            photo.title,
            if photo.date.is_empty() { "-" } else { photo.date.as_str() },
            photo.description
        );
    }
}

// WASM doesn't use main(), it uses wasm_bindgen's start function
#[cfg(target_arch = "wasm32")]
fn main() {}
