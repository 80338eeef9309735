use flexview_core::{ViewError, ViewTree};
use flexview_reactive::Effect;
use flexview_style::{AlignItems, FlexDirection, JustifyContent};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut tree = ViewTree::new();

    let toolbar = tree.add_flexbox();
    let _watch = Effect::from_property(&tree.flexbox_props(toolbar)?.flex_direction, |value| {
        info!(%value, "toolbar direction");
    });

    tree.set_flex_direction(toolbar, FlexDirection::Row)?;
    tree.set_justify_content(toolbar, JustifyContent::SpaceBetween)?;
    tree.set_align_items(toolbar, AlignItems::Center)?;

    let back = tree.add_view();
    let title = tree.add_view();
    let menu = tree.add_view();
    for &button in &[back, title, menu] {
        tree.add_child(toolbar, button)?;
    }
    tree.engine_mut().set_intrinsic_size(back, 48.0, 48.0);
    tree.engine_mut().set_intrinsic_size(title, 200.0, 32.0);
    tree.engine_mut().set_intrinsic_size(menu, 48.0, 48.0);

    // Markup-style binding, including a typo that falls back to the default
    tree.set_property_str(title, "flex-grow", "1")?;
    tree.set_property_str(toolbar, "flex-wrap", "no-wrap-oops")?;
    match tree.set_property_str(title, "flex-shrink", "-1") {
        Err(ViewError::InvalidValue { property, value }) => {
            info!(property, value, "rejected invalid markup value");
        }
        other => other?,
    }

    tree.set_root(toolbar)?;
    tree.compute_layout(640.0, 64.0)?;

    for (name, view) in [("back", back), ("title", title), ("menu", menu)] {
        if let Some(layout) = tree.layout(view) {
            println!(
                "{name}: {}x{} at ({}, {})",
                layout.size.width, layout.size.height, layout.location.x, layout.location.y
            );
        }
    }

    Ok(())
}
