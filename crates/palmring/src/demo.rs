use crate::menu::{MenuItem, MenuLayer};

fn announce(what: &'static str) -> impl FnMut() + 'static {
    move || log::info!("{} selected", what)
}

/// A small file/edit menu whose leaves only log.
pub fn demo_layers() -> Vec<MenuLayer> {
    vec![
        MenuLayer::new(
            "Root",
            vec![
                MenuItem::layer("File", "File"),
                MenuItem::layer("Edit", "Edit"),
                MenuItem::close("About").with_callback(announce("About")),
                MenuItem::close("Cancel"),
            ],
        ),
        MenuLayer::new(
            "File",
            vec![
                MenuItem::close("New").with_callback(announce("New")),
                MenuItem::close("Open").with_callback(announce("Open")),
                MenuItem::close("Close").with_callback(announce("Close")),
                MenuItem::back("Back"),
            ],
        ),
        MenuLayer::new(
            "Edit",
            vec![
                MenuItem::close("Copy").with_callback(announce("Copy")),
                MenuItem::close("Paste").with_callback(announce("Paste")),
                MenuItem::back("Back"),
            ],
        ),
    ]
}
