//! Full-pipeline tests: control points through to exported meshes.

use glam::Vec3;
use viso_tube::export::write_obj;
use viso_tube::geometry::{
    catmull_rom_chain, compute_rmf, CapMode, NormalShading, TubeMeshBuilder,
};
use viso_tube::options::Options;
use viso_tube::pipeline::{TubeGeometryCache, TubePipeline};
use viso_tube::structure::{normalize_to_unit_cube, parse_ca_trace};

const EPS: f32 = 1e-5;

fn helix(turns: f32, samples: usize) -> Vec<Vec3> {
    (0..samples)
        .map(|i| {
            let t = i as f32 / (samples - 1) as f32
                * turns
                * std::f32::consts::TAU;
            Vec3::new(t.cos(), t.sin(), 0.25 * t)
        })
        .collect()
}

#[test]
fn collinear_trace_gives_a_straight_round_tube() {
    let points = [
        Vec3::ZERO,
        Vec3::X,
        Vec3::new(2.0, 0.0, 0.0),
        Vec3::new(3.0, 0.0, 0.0),
    ];
    let curve = catmull_rom_chain(&points, 2, 1.0).unwrap();
    assert_eq!(curve.len(), 4);
    for p in curve.iter() {
        assert!(p.y.abs() < EPS && p.z.abs() < EPS, "{p} off the x axis");
    }

    let frames = compute_rmf(&curve).unwrap();
    for frame in frames.iter() {
        assert!((frame.tangent - Vec3::X).length() < EPS);
    }

    let builder = TubeMeshBuilder::new(&curve, &frames, 0.1, 4).unwrap();
    let rings = builder.generate_rings();
    for i in 0..rings.ring_count() {
        let center = curve.point(i);
        for j in 0..rings.radial_segments() {
            let offset = rings.vertex(i, j) - center;
            assert!(offset.x.abs() < EPS, "ring {i} not in the y-z plane");
            assert!((offset.length() - 0.1).abs() < EPS);
        }
    }
}

#[test]
fn helix_runs_end_to_end_without_twist_or_nans() {
    let mut opts = Options::default();
    opts.tube.radius = 0.1;
    opts.tube.radial_segments = 12;
    let geo = TubePipeline::new(&opts).unwrap().run(&helix(3.0, 40)).unwrap();

    assert_eq!(geo.curve.len(), 39 * 9 + 1);
    assert_eq!(geo.frames.len(), geo.curve.len());
    for frame in geo.frames.iter() {
        assert!(frame.is_orthonormal(1e-4));
    }
    for twist in geo.frames.step_twists() {
        assert!(twist.abs() < 0.05, "per-step twist {twist}");
    }

    let side = geo.mesh.side();
    assert_eq!(side.triangle_count(), (geo.curve.len() - 1) * 12 * 2);
    assert!(side.positions().iter().all(|p| p.is_finite()));
    assert!(side.normals().iter().all(|n| (n.length() - 1.0).abs() < 1e-4));
    assert_eq!(geo.mesh.cap_triangle_count(), 2 * 12);
}

#[test]
fn repeated_control_point_keeps_rings_aligned() {
    let points = [
        Vec3::ZERO,
        Vec3::X,
        Vec3::X,
        Vec3::new(2.0, 1.0, 0.0),
        Vec3::new(3.0, 1.0, 0.5),
    ];
    let geo = TubePipeline::new(&Options::default())
        .unwrap()
        .run(&points)
        .unwrap();

    let builder =
        TubeMeshBuilder::new(&geo.curve, &geo.frames, 0.01, 15).unwrap();
    let rings = builder.generate_rings();
    for i in 0..rings.ring_count() - 1 {
        let jump = (rings.normal(i + 1, 0) - rings.normal(i, 0)).length();
        assert!(jump < 1.0, "ring {i} to {} turns by {jump}", i + 1);
    }
}

#[test]
fn smooth_and_flat_share_positions() {
    let mut opts = Options::default();
    let flat = TubePipeline::new(&opts).unwrap().run(&helix(1.0, 8)).unwrap();
    opts.tube.shading = NormalShading::Smooth;
    let smooth = TubePipeline::new(&opts).unwrap().run(&helix(1.0, 8)).unwrap();

    assert_eq!(
        flat.mesh.side().positions(),
        smooth.mesh.side().positions()
    );
    assert_ne!(flat.mesh.side().normals(), smooth.mesh.side().normals());
}

#[test]
fn cache_reuses_geometry_until_the_trace_moves() {
    let mut cache = TubeGeometryCache::new(&Options::default()).unwrap();
    let trace = helix(2.0, 20);

    let (first, rebuilt) = cache.update(&trace).unwrap();
    assert!(rebuilt);
    let first_count = first.mesh.triangle_count();

    let (again, rebuilt) = cache.update(&trace).unwrap();
    assert!(!rebuilt);
    assert_eq!(again.mesh.triangle_count(), first_count);

    let mut edited = trace.clone();
    edited[10] += Vec3::splat(0.01);
    let (_, rebuilt) = cache.update(&edited).unwrap();
    assert!(rebuilt);
}

#[test]
fn pdb_trace_exports_to_obj() {
    let pdb = "\
ATOM      2  CA  MET A   1      11.639   6.071  -5.147  1.00  0.00           C
ATOM      6  CA  ILE A   2      13.880   4.986  -3.956  1.00  0.00           C
ATOM     10  CA  GLN A   3      15.851   2.874  -2.861  1.00  0.00           C
ATOM     14  CA  VAL A   4      17.013   0.632  -0.066  1.00  0.00           C
ATOM     18  CA  PHE A   5      18.802  -2.560   0.789  1.00  0.00           C
END
";
    let trace = normalize_to_unit_cube(&parse_ca_trace(pdb).unwrap());
    assert_eq!(trace.len(), 5);
    for p in &trace {
        assert!(p.abs().max_element() <= 0.5 + EPS);
    }

    let mut opts = Options::default();
    opts.tube.caps = CapMode::Ends;
    let geo = TubePipeline::new(&opts).unwrap().run(&trace).unwrap();

    let mut buf = Vec::new();
    write_obj(&geo.mesh, &mut buf).unwrap();
    let text = String::from_utf8(buf).unwrap();

    let faces = text.lines().filter(|l| l.starts_with("f ")).count();
    assert_eq!(
        faces,
        geo.mesh.triangle_count() + geo.mesh.cap_triangle_count()
    );
    assert!(!text.contains("NaN"));
}
