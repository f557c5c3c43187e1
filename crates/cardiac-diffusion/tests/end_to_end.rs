//! Whole-pipeline checks against closed-form derivatives.
//!
//! Each test builds an anatomy, constructs a `GridDiffusion` with the host
//! kernel, scatters a known voltage field and compares `calc` output with
//! the value the finite-volume scheme gives by hand.

use cardiac_core::{Anatomy, CellAnatomy, Spacing, SymmetricTensor, Tuple};
use cardiac_diffusion::{Diffusion, DiffusionConfig, FaceConductivity, GridDiffusion};
use cardiac_test_utils::{random_tissue, solid_block};
use proptest::prelude::*;

const EPS: f64 = 1e-12;

fn padded() -> DiffusionConfig {
    DiffusionConfig::builder().pad_grid(true).build().unwrap()
}

fn field(anatomy: &CellAnatomy, f: impl Fn(Tuple) -> f64) -> Vec<f64> {
    (0..anatomy.n_local())
        .map(|c| f(anatomy.global_tuple(c)))
        .collect()
}

fn run(anatomy: &CellAnatomy, config: DiffusionConfig, v: &[f64]) -> Vec<f64> {
    let mut d = GridDiffusion::with_host_kernel(anatomy, config).unwrap();
    d.update_local_voltage(v).unwrap();
    let mut out = vec![0.0; anatomy.n_local()];
    d.calc(&mut out).unwrap();
    out
}

#[test]
fn cube_coefficients_are_unit_diagonal() {
    let a = solid_block(3, 3, 3, SymmetricTensor::isotropic(1.0));
    let mut d = GridDiffusion::with_host_kernel(&a, DiffusionConfig::default()).unwrap();
    let faces = d.face_conductivity().to_vec();
    assert_eq!(faces.len(), 8 * 9);

    let mut unit_diagonals = 0;
    for pos in 0..8 {
        for i in 0..3 {
            for j in 0..3 {
                let c = faces[FaceConductivity::offset(pos, i, j)];
                if i == j {
                    assert_eq!(c, 1.0);
                    unit_diagonals += 1;
                } else {
                    assert_eq!(c, 0.0);
                }
            }
        }
    }
    assert_eq!(unit_diagonals, 24);
}

#[test]
fn cube_linear_field_flux_only_at_end_layers() {
    let a = solid_block(3, 3, 3, SymmetricTensor::isotropic(1.0));
    let v = field(&a, |t| f64::from(t.x));
    let out = run(&a, DiffusionConfig::default(), &v);

    for (c, dv) in out.iter().enumerate() {
        let t = a.global_tuple(c);
        // Cells on the y = 0 or z = 0 layer own no face slot.
        let expected = match t.x {
            _ if t.y == 0 || t.z == 0 => 0.0,
            0 => 1.0,
            2 => -1.0,
            _ => 0.0,
        };
        assert!((dv - expected).abs() < EPS, "cell {t}: {dv} != {expected}");
    }
}

#[test]
fn padded_cube_linear_field_covers_whole_end_layers() {
    let a = solid_block(3, 3, 3, SymmetricTensor::isotropic(1.0));
    let v = field(&a, |t| f64::from(t.x));
    let out = run(&a, padded(), &v);

    for (c, dv) in out.iter().enumerate() {
        let expected = match a.global_tuple(c).x {
            0 => 1.0,
            2 => -1.0,
            _ => 0.0,
        };
        assert!((dv - expected).abs() < EPS);
    }
    assert!(out.iter().sum::<f64>().abs() < EPS);
}

#[test]
fn quadratic_field_gives_second_derivative_inside() {
    let spacing = Spacing::new(0.5, 1.0, 2.0).unwrap();
    let sigma = SymmetricTensor::isotropic(1.0);
    let mut builder = CellAnatomy::builder().spacing(spacing);
    for x in 0..6 {
        for y in 0..3 {
            for z in 0..3 {
                builder = builder.local(Tuple::new(x, y, z), sigma);
            }
        }
    }
    let a = builder.build().unwrap();
    let v = field(&a, |t| {
        let x = f64::from(t.x) * 0.5;
        x * x
    });
    let out = run(&a, padded(), &v);

    for (c, dv) in out.iter().enumerate() {
        let t = a.global_tuple(c);
        if (1..5).contains(&t.x) {
            assert!((dv - 2.0).abs() < 1e-9, "cell {t}: {dv}");
        }
    }
}

#[test]
fn off_diagonal_conductivity_drives_transverse_flux() {
    // V = y with sigma_xy = 0.3 pushes flux along x at the x faces of the
    // middle row. It cancels in the centre and shows up on the x ends.
    let sigma = SymmetricTensor::new(1.0, 0.3, 0.0, 1.0, 0.0, 1.0);
    let a = solid_block(3, 3, 3, sigma);
    let v = field(&a, |t| f64::from(t.y));
    let out = run(&a, padded(), &v);

    let at = |x, y, z| {
        let c = (0..a.size())
            .find(|&c| a.global_tuple(c) == Tuple::new(x, y, z))
            .unwrap();
        out[c]
    };
    assert!((at(0, 1, 1) - 0.3).abs() < EPS);
    assert!(at(1, 1, 1).abs() < EPS);
    assert!((at(2, 1, 1) + 0.3).abs() < EPS);
}

#[test]
fn holes_block_flux() {
    // Two columns joined only through a removed cell carry no current.
    let sigma = SymmetricTensor::isotropic(1.0);
    let a = CellAnatomy::builder()
        .local(Tuple::new(0, 0, 0), sigma)
        .local(Tuple::new(2, 0, 0), sigma)
        .build()
        .unwrap();
    let out = run(&a, padded(), &[0.0, 10.0]);
    assert_eq!(out, vec![0.0, 0.0]);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn flux_is_conserved_on_all_local_tissue(
        seed in any::<u64>(),
        fill in 0.3f64..1.0,
    ) {
        let a = random_tissue(seed, [5, 4, 4], fill, 0.0);
        let v: Vec<f64> = (0..a.n_local())
            .map(|c| {
                let t = a.global_tuple(c);
                (f64::from(t.x) * 0.7).sin() + f64::from(t.y * t.z) * 0.1
            })
            .collect();
        let out = run(&a, padded(), &v);
        let volume = a.spacing().cell_volume();
        let total: f64 = out.iter().map(|dv| dv * volume).sum();
        let scale: f64 = out.iter().map(|dv| (dv * volume).abs()).sum::<f64>().max(1.0);
        prop_assert!(total.abs() < 1e-9 * scale, "net flux {}", total);
    }

    #[test]
    fn reset_calc_is_repeatable(seed in any::<u64>()) {
        let a = random_tissue(seed, [4, 4, 3], 0.8, 0.0);
        let v: Vec<f64> = (0..a.n_local()).map(|c| c as f64 * 0.01).collect();
        let mut d = GridDiffusion::with_host_kernel(&a, padded()).unwrap();
        d.update_local_voltage(&v).unwrap();
        let mut first = vec![0.0; a.n_local()];
        d.calc(&mut first).unwrap();
        let mut second = vec![123.0; a.n_local()];
        d.calc(&mut second).unwrap();
        prop_assert_eq!(first, second);
    }
}
