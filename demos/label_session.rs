//! A short scripted editing session on three blobs that start out mislabeled.
//!
//! Run with `RUST_LOG=labelkit=debug` to see the editor's own log lines.

use labelkit::{Color, Session, ViewTransform};

struct Viewport {
    zoom: f32,
}

impl ViewTransform for Viewport {
    fn reset(&mut self) {
        self.zoom = 1.0;
    }
}

fn print_legend(title: &str, session: &Session) {
    println!("=== {title} ===");
    for entry in session.legend().entries() {
        println!(
            "  {:<14} {}  {:2} points",
            entry.name, entry.color, entry.member_count
        );
    }
}

fn main() -> labelkit::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Three well-separated blobs in 2D, but the labeler only told two apart.
    let coords = vec![
        // Blob A (near origin)
        (0.0, 0.0),
        (0.1, 0.2),
        (0.2, 0.1),
        (-0.1, 0.1),
        // Blob B (near (5, 5))
        (5.0, 5.0),
        (5.1, 4.9),
        (4.9, 5.1),
        (5.2, 5.2),
        // Blob C (near (10, 0))
        (10.0, 0.0),
        (10.1, 0.1),
        (9.9, -0.1),
        (10.2, 0.2),
    ];
    let labels = [
        "left", "left", "left", "left", "left", "left", "left", "left", "right", "right",
        "right", "right",
    ];
    let hover = (0..coords.len()).map(|i| format!("sample #{i}")).collect();

    let mut session = Session::builder(coords, &labels)
        .with_metadata(hover)
        .with_pick_radius(0.3)
        .build()?;
    print_legend("initial", &session);

    // Lasso blob B and give it its own label.
    let mut ctl = session.controller();
    let n = ctl.lasso(&[(4.0, 4.0), (6.0, 4.0), (6.0, 6.0), (4.0, 6.0)])?;
    println!("\nlasso selected {n} points");
    if let Some(middle) = ctl.perform_split()? {
        ctl.rename(middle, "middle")?;
        ctl.recolor(middle, Color::from_hex("#9467bd")?)?;
    }
    print_legend("after split", &session);

    // A stray point: (0.2, 0.1) really belongs with the right-hand blob.
    let right = session.partition().cluster_of(8)?;
    let mut ctl = session.controller();
    if let Some(i) = ctl.pick_at(0.2, 0.1)? {
        println!("\npicked point {i}: {:?}", session.points().metadata_of(i)?);
    }
    session.controller().perform_merge(right)?;
    print_legend("after merge", &session);

    // Reset: nothing is selected, so the view goes back to fit.
    let mut viewport = Viewport { zoom: 4.0 };
    let outcome = session.controller().reset_view(&mut viewport);
    println!("\nreset: {outcome:?}, zoom now {}", viewport.zoom);

    println!("\nlabels by index:");
    for (i, label) in session.labels_by_index().iter().enumerate() {
        println!("  point {i:2} => {label}");
    }
    Ok(())
}
