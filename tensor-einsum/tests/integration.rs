//! End-to-end contraction scenarios: matrix product, trace, label-aligned
//! addition, chained products, and mixed element types.

use approx::assert_abs_diff_eq;
use num_complex::Complex64;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tensor_einsum::{EinsumError, LabeledTensor};
use tensor_view::View;

fn counting_i64(extents: &[usize], names: &[char]) -> LabeledTensor<i64, char> {
    let mut k = 0;
    let view = View::from_fn(extents, |_| {
        k += 1;
        k
    })
    .unwrap();
    LabeledTensor::new(view, names).unwrap()
}

#[test]
fn matrix_product() {
    // X(2,3){n,m} * Y(3,2){m,p}, both filled 1.. in iteration order
    let x = counting_i64(&[2, 3], &['n', 'm']);
    let y = counting_i64(&[3, 2], &['m', 'p']);
    let result = (x * y).evaluate().unwrap();

    let names: Vec<char> = result.labels().iter().map(|l| l.name).collect();
    assert_eq!(names, vec!['n', 'p']);
    let v = result.view();
    assert_eq!(v.extents(), &[2, 2]);
    assert_eq!(v.get(&[0, 0]), Ok(22));
    assert_eq!(v.get(&[0, 1]), Ok(28));
    assert_eq!(v.get(&[1, 0]), Ok(49));
    assert_eq!(v.get(&[1, 1]), Ok(64));
}

#[test]
fn product_with_two_common_labels() {
    // T(2,3,2){n,m,o} * U(3,2){m,n}: n and m are summed, o stays free
    let t = counting_i64(&[2, 3, 2], &['n', 'm', 'o']);
    let u = counting_i64(&[3, 2], &['m', 'n']);
    let result = (t * u).evaluate().unwrap();
    assert_eq!(result.view().extents(), &[2]);
    assert_eq!(result.view().iter().collect::<Vec<_>>(), vec![151, 172]);
}

#[test]
fn trace_of_a_square_tensor() {
    // T(3,3){n,n} filled 1..9: trace = 1 + 5 + 9
    let t = counting_i64(&[3, 3], &['n', 'n']);
    let traced = t.materialize().unwrap();
    assert_eq!(traced.extents(), &[1]);
    assert_eq!(traced.get(&[0]), Ok(15));
}

#[test]
fn full_contraction_of_three_tensors() {
    // every label shared: the product collapses to a scalar
    let x = counting_i64(&[2, 3], &['n', 'm']);
    let y = counting_i64(&[3, 2], &['m', 'p']);
    let z = counting_i64(&[2, 2], &['n', 'p']);
    let expr = x * y * z;
    assert!(matches!(
        expr.evaluate(),
        Err(EinsumError::TraceLabelRequired)
    ));
    let result = expr.evaluate_traced('t').unwrap();
    assert_eq!(result.labels()[0].name, 't');
    // Σ_{n,p} (XY)[n,p]·Z[n,p] with XY = [[22,28],[49,64]], Z = [[1,2],[3,4]]
    assert_eq!(result.view().get(&[0]), Ok(22 + 56 + 147 + 256));
}

#[test]
fn sum_aligns_axes_by_name() {
    // X(2,3){n,m} + Y(3,2){m,n}: result[i,j] = X[i,j] + Y[j,i]
    let x = counting_i64(&[2, 3], &['n', 'm']);
    let mut k = 6;
    let y_view = View::from_fn(&[3, 2], |_| {
        k += 1;
        k
    })
    .unwrap();
    let y = LabeledTensor::new(y_view, &['m', 'n']).unwrap();
    let result = (x + y).evaluate().unwrap();

    let names: Vec<char> = result.labels().iter().map(|l| l.name).collect();
    assert_eq!(names, vec!['n', 'm']);
    assert_eq!(result.view().extents(), &[2, 3]);
    assert_eq!(
        result.view().iter().collect::<Vec<_>>(),
        vec![8, 11, 14, 12, 15, 18]
    );
}

#[test]
fn sum_rejects_mismatched_sizes() {
    let x = counting_i64(&[2, 3], &['n', 'm']);
    let y = counting_i64(&[3, 3], &['m', 'n']); // 'n' is 2 in X but 3 in Y
    assert!(matches!(
        (x + y).evaluate(),
        Err(EinsumError::SizeMismatch { .. })
    ));
}

#[test]
fn sum_rejects_a_surviving_free_label() {
    let x = counting_i64(&[2, 3], &['n', 'm']);
    let y = counting_i64(&[2, 3], &['n', 'p']);
    assert!(matches!(
        (x + y).evaluate(),
        Err(EinsumError::ShapeMismatch { .. })
    ));
}

#[test]
fn sum_of_product_and_tensor() {
    // X*Y yields {n,p}; adding Z{n,p} is elementwise on the product result
    let x = counting_i64(&[2, 3], &['n', 'm']);
    let y = counting_i64(&[3, 2], &['m', 'p']);
    let z = counting_i64(&[2, 2], &['n', 'p']);
    let result = (x * y + z).evaluate().unwrap();
    assert_eq!(
        result.view().iter().collect::<Vec<_>>(),
        vec![22 + 1, 28 + 2, 49 + 3, 64 + 4]
    );
}

#[test]
fn outer_product_keeps_all_labels_free() {
    let x = counting_i64(&[2], &['n']);
    let y = counting_i64(&[3], &['m']);
    let result = (x * y).evaluate().unwrap();
    assert_eq!(result.view().extents(), &[2, 3]);
    assert_eq!(
        result.view().iter().collect::<Vec<_>>(),
        vec![1, 2, 3, 2, 4, 6]
    );
}

#[test]
fn partial_trace_keeps_the_free_axis() {
    // T[i,i,j] summed over i
    let t = counting_i64(&[2, 2, 3], &['n', 'n', 'm']);
    let v = t.materialize().unwrap();
    assert_eq!(v.extents(), &[3]);
    assert_eq!(v.iter().collect::<Vec<_>>(), vec![11, 13, 15]);
}

#[test]
fn derived_views_are_first_class_operands() {
    // contracting a window must agree with contracting its deep copy
    let base = View::<i64>::from_fn(&[4, 4], |c| (c[0] * 4 + c[1]) as i64).unwrap();
    let w = base.windowing(0, 1, 2).unwrap().windowing(1, 0, 2).unwrap();
    let from_window = LabeledTensor::new(w.clone(), &['n', 'm']).unwrap();
    let from_copy = LabeledTensor::new(w.copy(), &['n', 'm']).unwrap();
    let y = counting_i64(&[3, 2], &['m', 'p']);

    let a = (from_window * y.clone()).evaluate().unwrap();
    let b = (from_copy * y).evaluate().unwrap();
    assert_eq!(
        a.view().iter().collect::<Vec<_>>(),
        b.view().iter().collect::<Vec<_>>()
    );
}

#[test]
fn evaluating_twice_gives_identical_results() {
    let x = counting_i64(&[2, 3], &['n', 'm']);
    let y = counting_i64(&[3, 2], &['m', 'p']);
    let z = counting_i64(&[2, 2], &['n', 'p']);
    let expr = x * y + z;
    let once = expr.evaluate().unwrap();
    let twice = expr.evaluate().unwrap();
    assert_eq!(
        once.view().iter().collect::<Vec<_>>(),
        twice.view().iter().collect::<Vec<_>>()
    );
}

#[test]
fn f64_matrix_product() {
    let x_view = View::from_fn(&[2, 2], |c| (c[0] * 2 + c[1]) as f64 + 0.5).unwrap();
    let y_view = View::from_fn(&[2, 2], |c| if c[0] == c[1] { 2.0 } else { 0.0 }).unwrap();
    let x = LabeledTensor::new(x_view.clone(), &['n', 'm']).unwrap();
    let y = LabeledTensor::new(y_view, &['m', 'p']).unwrap();
    let result = (x * y).evaluate().unwrap();
    for c in x_view.coords() {
        assert_abs_diff_eq!(
            result.view().get(&c).unwrap(),
            2.0 * x_view.get(&c).unwrap(),
            epsilon = 1e-12
        );
    }
}

#[test]
fn complex_identity_product() {
    let a_values = [
        Complex64::new(1.0, 1.0),
        Complex64::new(2.0, 0.0),
        Complex64::new(3.0, 0.0),
        Complex64::new(4.0, -1.0),
    ];
    let a_view = View::from_fn(&[2, 2], |c| a_values[c[0] * 2 + c[1]]).unwrap();
    let id_view = View::from_fn(&[2, 2], |c| {
        if c[0] == c[1] {
            Complex64::new(1.0, 0.0)
        } else {
            Complex64::new(0.0, 0.0)
        }
    })
    .unwrap();
    let a = LabeledTensor::new(a_view.clone(), &['n', 'm']).unwrap();
    let id = LabeledTensor::new(id_view, &['m', 'p']).unwrap();
    let result = (a * id).evaluate().unwrap();
    for c in a_view.coords() {
        let got = result.view().get(&c).unwrap();
        let want = a_view.get(&c).unwrap();
        assert_abs_diff_eq!(got.re, want.re);
        assert_abs_diff_eq!(got.im, want.im);
    }
}

#[test]
fn randomized_product_matches_naive_loops() {
    let mut rng = StdRng::seed_from_u64(42);
    let x_view = View::from_fn(&[2, 3], |_| rng.gen_range(-1.0..1.0)).unwrap();
    let y_view = View::from_fn(&[3, 4], |_| rng.gen_range(-1.0..1.0)).unwrap();
    let x = LabeledTensor::new(x_view.clone(), &['n', 'm']).unwrap();
    let y = LabeledTensor::new(y_view.clone(), &['m', 'p']).unwrap();
    let result = (x * y).evaluate().unwrap();

    for i in 0..2 {
        for k in 0..4 {
            let mut want = 0.0;
            for j in 0..3 {
                want += x_view.get(&[i, j]).unwrap() * y_view.get(&[j, k]).unwrap();
            }
            assert_abs_diff_eq!(result.view().get(&[i, k]).unwrap(), want, epsilon = 1e-12);
        }
    }
}
