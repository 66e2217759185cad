mod make_box;
mod make_cylinder;
mod make_face;
mod make_sphere;

pub use make_box::MakeBox;
pub use make_cylinder::MakeCylinder;
pub use make_face::MakeFace;
pub use make_sphere::MakeSphere;

use crate::topology::{EntityStore, FaceId, ShellData, SolidData, SolidId};

/// Wraps `faces` in a closed outer shell and inserts the solid.
fn closed_solid(store: &mut EntityStore, faces: Vec<FaceId>) -> SolidId {
    let shell = store.add_shell(ShellData {
        faces,
        is_closed: true,
    });
    store.add_solid(SolidData {
        outer_shell: shell,
        inner_shells: Vec::new(),
    })
}
