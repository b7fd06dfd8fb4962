use approx::assert_relative_eq;
use charge_physics::{coulomb_force, Charge, COULOMB_K};
use force_engine::{solve, ForceError};
use glam::DVec3;

fn scattered_charges() -> Vec<Charge> {
    vec![
        Charge::at(1.0e-6, 0.0, 0.0, 0.0),
        Charge::at(-2.5e-6, 1.0, 0.5, -0.3),
        Charge::at(4.0e-7, -0.8, 2.0, 1.1),
        Charge::at(3.0e-6, 0.2, -1.4, 0.9),
        Charge::at(-1.0e-6, 2.2, 1.7, -2.0),
    ]
}

fn assert_vec_close(actual: DVec3, expected: DVec3) {
    let scale = expected.length().max(actual.length());
    assert!(
        (actual - expected).length() <= scale * 1.0e-12,
        "{actual:?} != {expected:?}"
    );
}

#[test]
fn net_force_is_sum_of_pairwise_forces() {
    let charges = scattered_charges();
    let field = solve(&charges).unwrap();

    for (i, target) in charges.iter().enumerate() {
        let expected = charges
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != i)
            .map(|(_, source)| coulomb_force(target, source).unwrap())
            .fold(DVec3::ZERO, |acc, f| acc + f);

        assert_vec_close(field.net_force(i), expected);
    }
}

#[test]
fn pairwise_forces_obey_third_law() {
    let charges = scattered_charges();

    for (i, a) in charges.iter().enumerate() {
        for b in charges.iter().skip(i + 1) {
            let on_a = coulomb_force(a, b).unwrap();
            let on_b = coulomb_force(b, a).unwrap();
            assert_vec_close(on_a, -on_b);
        }
    }

    // Internal forces cancel in total
    let field = solve(&charges).unwrap();
    let total = field.net_forces().iter().fold(DVec3::ZERO, |acc, f| acc + *f);
    assert!(total.length() <= field.max_force_magnitude() * 1.0e-12);
}

#[test]
fn distance_matrix_is_symmetric_with_zero_diagonal() {
    let charges = scattered_charges();
    let field = solve(&charges).unwrap();
    let distances = field.distances();

    assert_eq!(distances.len(), charges.len());
    for i in 0..charges.len() {
        assert_eq!(distances.get(i, i), 0.0);
        for j in 0..charges.len() {
            assert_eq!(distances.get(i, j), distances.get(j, i));
            if i != j {
                assert_relative_eq!(
                    distances.get(i, j),
                    charges[i].position.distance(charges[j].position),
                    max_relative = 1.0e-12
                );
            }
        }
    }
    assert_eq!(distances.pairs().count(), 10);
}

#[test]
fn coincident_charges_abort_without_output() {
    let mut charges = scattered_charges();
    charges[4].position = charges[2].position;

    let result = solve(&charges);

    assert_eq!(
        result,
        Err(ForceError::CoincidentCharges {
            first: 2,
            second: 4
        })
    );
    let message = result.unwrap_err().to_string();
    assert!(message.contains("charges 3 and 5"));
}

#[test]
fn default_form_input_is_coincident() {
    // The form starts every charge at the origin
    let charges = [
        Charge::at(Charge::default_charge_for(0), 0.0, 0.0, 0.0),
        Charge::at(Charge::default_charge_for(1), 0.0, 0.0, 0.0),
    ];

    assert_eq!(
        solve(&charges),
        Err(ForceError::CoincidentCharges {
            first: 0,
            second: 1
        })
    );
}

#[test]
fn opposite_pair_attracts_with_inverse_square_magnitude() {
    let q = 2.0e-6;
    let d = 0.5;
    let charges = [Charge::at(q, 0.0, 0.0, 0.0), Charge::at(-q, 0.0, 0.0, d)];

    let field = solve(&charges).unwrap();
    let expected = COULOMB_K * q * q / (d * d);

    let on_first = field.net_force(0);
    let on_second = field.net_force(1);

    assert_relative_eq!(on_first.length(), expected, max_relative = 1.0e-12);
    assert_relative_eq!(on_second.length(), expected, max_relative = 1.0e-12);

    // Directed along the joining line, toward the partner
    assert_eq!(on_first.x, 0.0);
    assert_eq!(on_first.y, 0.0);
    assert!(on_first.z > 0.0);
    assert!(on_second.z < 0.0);
}

#[test]
fn centroid_charge_feels_no_net_force() {
    // Equilateral triangle of equal charges around a test charge at the centroid
    let r = 1.5;
    let angles = [0.0_f64, 120.0, 240.0];
    let mut charges: Vec<_> = angles
        .iter()
        .map(|deg| {
            let a = deg.to_radians();
            Charge::at(3.0e-6, r * a.cos(), r * a.sin(), 0.0)
        })
        .collect();
    charges.push(Charge::at(-1.0e-6, 0.0, 0.0, 0.0));

    let field = solve(&charges).unwrap();
    let single = COULOMB_K * 3.0e-12 / (r * r);

    assert!(field.net_force(3).length() <= single * 1.0e-9);
}

#[test]
fn midpoint_between_equal_charges_cancels_along_axis() {
    let charges = [
        Charge::at(1.0e-6, -1.0, 0.0, 0.0),
        Charge::at(1.0e-6, 1.0, 0.0, 0.0),
        Charge::at(5.0e-7, 0.0, 0.0, 0.0),
    ];

    let field = solve(&charges).unwrap();

    assert!(field.net_force(2).length() <= COULOMB_K * 1.0e-12 * 1.0e-12);
}

#[test]
fn scaling_charges_scales_forces_quadratically() {
    let charges = scattered_charges();
    let c = 3.0;
    let scaled: Vec<_> = charges.iter().map(|q| q.scaled(c)).collect();

    let base = solve(&charges).unwrap();
    let field = solve(&scaled).unwrap();

    for i in 0..charges.len() {
        assert_relative_eq!(
            field.net_force(i).length(),
            c * c * base.net_force(i).length(),
            max_relative = 1.0e-9
        );
    }
    assert_eq!(field.distances(), base.distances());
}
