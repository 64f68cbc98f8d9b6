//! Wavefront OBJ export.
//!
//! The side surface is written with positions (`v`), vertex normals (`vn`)
//! and faces referencing both. Cap fans carry no normals and go into their
//! own `g caps` group after the side surface; their facing comes from the
//! winding alone. Caps built with `CapMode::Ends` face away from the tube,
//! while `CapMode::AllRings` fans all face along the tangent.

use std::io::{self, Write};

use crate::geometry::TubeMesh;

/// Write a [`TubeMesh`] as Wavefront OBJ text to the given writer.
pub fn write_obj<W: Write>(mesh: &TubeMesh, writer: &mut W) -> io::Result<()> {
    let side = mesh.side();
    writeln!(writer, "# viso-tube OBJ export")?;
    writeln!(
        writer,
        "# Side triangles: {}, Cap triangles: {}",
        side.triangle_count(),
        mesh.cap_triangle_count()
    )?;

    writeln!(writer, "g side")?;
    for v in side.positions().iter() {
        writeln!(writer, "v {:.6} {:.6} {:.6}", v.x, v.y, v.z)?;
    }
    for n in side.normals().iter() {
        writeln!(writer, "vn {:.6} {:.6} {:.6}", n.x, n.y, n.z)?;
    }
    // Triangle soup: vertex and normal indices coincide (1-based)
    for t in 0..side.triangle_count() {
        let i0 = t * 3 + 1;
        let (i1, i2) = (i0 + 1, i0 + 2);
        writeln!(writer, "f {i0}//{i0} {i1}//{i1} {i2}//{i2}")?;
    }

    let Some(caps) = mesh.caps() else {
        return Ok(());
    };
    let base = side.positions().len();
    writeln!(writer, "g caps")?;
    for v in caps.positions().iter() {
        writeln!(writer, "v {:.6} {:.6} {:.6}", v.x, v.y, v.z)?;
    }
    for t in 0..caps.triangle_count() {
        let i0 = base + t * 3 + 1;
        writeln!(writer, "f {} {} {}", i0, i0 + 1, i0 + 2)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::geometry::{
        catmull_rom_chain, compute_rmf, CapMode, TubeMeshBuilder,
    };

    fn mesh(caps: CapMode) -> TubeMesh {
        let curve = catmull_rom_chain(
            &[Vec3::ZERO, Vec3::X, Vec3::new(2.0, 1.0, 0.0)],
            4,
            1.0,
        )
        .unwrap();
        let frames = compute_rmf(&curve).unwrap();
        TubeMeshBuilder::new(&curve, &frames, 0.1, 6)
            .unwrap()
            .build(caps)
            .unwrap()
    }

    fn export(mesh: &TubeMesh) -> String {
        let mut buf = Vec::new();
        write_obj(mesh, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn obj_contains_vertices_and_faces() {
        let mesh = mesh(CapMode::Ends);
        let text = export(&mesh);

        let v_count = text.lines().filter(|l| l.starts_with("v ")).count();
        let vn_count = text.lines().filter(|l| l.starts_with("vn ")).count();
        let f_count = text.lines().filter(|l| l.starts_with("f ")).count();

        let side = mesh.side().triangle_count();
        let caps = mesh.cap_triangle_count();
        assert_eq!(v_count, (side + caps) * 3);
        assert_eq!(vn_count, side * 3);
        assert_eq!(f_count, side + caps);
        assert!(text.contains("g caps"));
    }

    #[test]
    fn obj_indices_stay_in_range() {
        let text = export(&mesh(CapMode::Ends));
        let v_count = text.lines().filter(|l| l.starts_with("v ")).count();

        for line in text.lines().filter(|l| l.starts_with("f ")) {
            for part in line.split_whitespace().skip(1) {
                let idx: usize =
                    part.split("//").next().unwrap().parse().unwrap();
                assert!(
                    (1..=v_count).contains(&idx),
                    "index {idx} outside 1..={v_count}"
                );
            }
        }
    }

    #[test]
    fn uncapped_mesh_has_no_cap_group() {
        let text = export(&mesh(CapMode::None));
        assert!(!text.contains("g caps"));
    }
}
