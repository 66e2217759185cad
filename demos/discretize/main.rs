//! Discretization demo: builds a small model, discretizes a few entities
//! through a session, and prints a summary of the resulting point cloud.
//!
//! Usage:
//! ```text
//! cargo run --example discretize                 # default steps 0.25 x 0.25
//! cargo run --example discretize -- 0.1 0.5      # custom U and V steps
//! RUST_LOG=surfcloud=debug cargo run --example discretize
//! ```

use std::ops::ControlFlow;

use surfcloud::discretize::{DiscretizeEntity, StepParameters};
use surfcloud::math::{Point3, Vector3};
use surfcloud::operations::creation::{MakeBox, MakeCylinder, MakeSphere};
use surfcloud::session::Session;
use surfcloud::topology::{EntityRef, EntityStore};
use surfcloud::SurfCloudError;

fn main() -> Result<(), SurfCloudError> {
    // Default: WARN for everything, INFO for surfcloud.
    // Override with RUST_LOG env var (e.g. RUST_LOG=surfcloud=debug).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("discretize=info".parse().unwrap_or_default())
        .add_directive("surfcloud=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let mut args = std::env::args().skip(1);
    let u_text = args.next().unwrap_or_else(|| "0.25".into());
    let v_text = args.next().unwrap_or_else(|| "0.25".into());

    let mut store = EntityStore::new();
    let block = MakeBox::new(Point3::origin(), Point3::new(2.0, 1.0, 1.0)).execute(&mut store)?;
    let rod = MakeCylinder::new(Point3::new(4.0, 0.0, 0.0), 0.5, Vector3::z(), 3.0)
        .execute(&mut store)?;
    let ball = MakeSphere::new(Point3::new(0.0, 4.0, 0.0), 1.0).execute(&mut store)?;

    // Walk the cylinder face by face to show progress reporting.
    let steps = StepParameters::new(0.5, 0.5)?;
    let rod_cloud = DiscretizeEntity::new(rod.into(), steps).execute_with_progress(&store, |p| {
        println!(
            "  rod face {}/{}: {} samples",
            p.face_index + 1,
            p.face_count,
            p.samples
        );
        ControlFlow::Continue(())
    })?;
    println!("rod preview: {} samples", rod_cloud.len());

    let mut session = Session::new(store);
    for entity in [EntityRef::from(block), rod.into(), ball.into()] {
        let seq = session.select(entity)?;
        let entry = session.discretize_selection(&u_text, &v_text)?;
        println!("entity {seq}: {} points", entry.points.len());
    }

    let cloud = session.cloud();
    println!(
        "point cloud: {} entities, {} points",
        cloud.len(),
        cloud.point_count()
    );
    Ok(())
}
