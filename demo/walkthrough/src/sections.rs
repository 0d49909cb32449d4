//! Tutorial sections.
//!
//! Each section prints its results to stdout; progress goes through
//! `tracing`.

use anyhow::{anyhow, Result};
use apply_core::types::{
    BoxError, Container, Factor, LabeledMatrix, Params, ScalarKind, Value,
};
use apply_engine::{col_means, row_means, unsplit, Applied, MarginApplied, ResultTemplate, Toolkit};
use apply_sim::SimRng;
use ndarray::{Array, Array2, Axis, IxDyn};
use tracing::info;

fn mean(args: &[Value], _: &Params) -> Result<Value, BoxError> {
    let v = args[0].to_f64_vec().ok_or("mean needs numeric input")?;
    if v.is_empty() {
        return Err("mean of an empty group".into());
    }
    Ok(Value::from(v.iter().sum::<f64>() / v.len() as f64))
}

fn range(args: &[Value], _: &Params) -> Result<Value, BoxError> {
    let v = args[0].to_f64_vec().ok_or("range needs numeric input")?;
    let lo = v.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = v.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    Ok(Value::vector([lo, hi]))
}

fn render(applied: &Applied) -> String {
    match applied {
        Applied::Vector(v) => render_labelled(v.values().iter().map(|s| s.to_string()), v.names()),
        Applied::Matrix(m) => render_matrix(m),
        Applied::List(list) => {
            let mut out = String::new();
            for (i, item) in list.iter().enumerate() {
                let label = list.name(i).map_or_else(|| format!("[[{}]]", i + 1), |n| format!("${}", n));
                out.push_str(&format!("{}\n  {}\n", label, render_value(item)));
            }
            out
        }
    }
}

fn render_labelled(values: impl Iterator<Item = String>, names: Option<&[String]>) -> String {
    let values: Vec<String> = values.collect();
    match names {
        Some(names) => names
            .iter()
            .zip(&values)
            .map(|(n, v)| format!("{}={}", n, v))
            .collect::<Vec<_>>()
            .join(" "),
        None => values.join(" "),
    }
}

fn render_matrix(m: &LabeledMatrix) -> String {
    let (rows, cols) = m.dim();
    let mut out = String::new();
    if let Some(names) = m.col_names() {
        out.push_str(&format!("\t{}\n", names.join("\t")));
    }
    for r in 0..rows {
        let label = m.row_names().and_then(|n| n.get(r)).cloned().unwrap_or_default();
        let cells: Vec<String> = (0..cols)
            .filter_map(|c| m.get(r, c).map(|s| s.to_string()))
            .collect();
        out.push_str(&format!("{}\t{}\n", label, cells.join("\t")));
    }
    out
}

fn render_value(value: &Value) -> String {
    match value.atomic_elements() {
        Some(elements) => elements
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(" "),
        None => format!("{:?}", value),
    }
}

fn numeric(values: &[f64]) -> Value {
    Value::vector(values.iter().copied())
}

/// `lapply`, `sapply` and `vapply` over a small list.
pub fn loops(toolkit: &Toolkit) -> Result<()> {
    info!("Section: loops");
    let data = Container::with_names(
        vec![
            numeric(&[1.0, 2.0, 3.0, 4.0, 5.0]),
            numeric(&[-1.5, 0.0, 1.5]),
            numeric(&[10.0, 20.0]),
        ],
        vec!["a".into(), "b".into(), "c".into()],
    )?;
    let aux = Params::new();

    let listed = toolkit.lapply(&data, mean, &aux)?;
    println!("lapply(x, mean)\n{}", render(&listed));

    let simplified = toolkit.sapply(&data, mean, &aux)?;
    println!("sapply(x, mean)\n{}\n", render(&simplified));

    let ranges = toolkit.sapply(&data, range, &aux)?;
    println!("sapply(x, range)\n{}", render(&ranges));

    let typed = toolkit.vapply(&data, range, &aux, ResultTemplate::vector(ScalarKind::Double, 2))?;
    println!("vapply(x, range, double[2])\n{}", render(&typed));

    let words: Container<Value> = vec![Value::from("apply"), Value::from("loop")].into();
    let lengths = toolkit.sapply(
        &words,
        |args: &[Value], _: &Params| {
            let word = args[0].as_scalar().and_then(|s| s.as_str()).ok_or("text only")?;
            Ok(Value::from(word.len() as i64))
        },
        &aux,
    )?;
    println!("sapply(words, nchar)\n{}\n", render(&lengths));
    Ok(())
}

/// `apply` over matrix rows, columns and a 3-dimensional array.
pub fn margins(toolkit: &Toolkit, seed: u64) -> Result<()> {
    info!(seed, "Section: margins");
    let mut rng = SimRng::from_seed(seed);
    let draws = rng.rnorm(20 * 10, 0.0, 1.0)?;
    let matrix = Array2::from_shape_vec((20, 10), draws)?;
    let aux = Params::new();

    let by_row = toolkit.apply(&matrix.clone().into_dyn(), &[Axis(0)], mean, &aux)?;
    let direct = row_means(&matrix).ok_or_else(|| anyhow!("matrix has no columns"))?;
    println!("apply(x, 1, mean) agrees with rowMeans: {}", same(&by_row, direct.iter())?);

    let by_col = toolkit.apply(&matrix.clone().into_dyn(), &[Axis(1)], mean, &aux)?;
    let direct = col_means(&matrix).ok_or_else(|| anyhow!("matrix has no rows"))?;
    println!("apply(x, 2, mean) agrees with colMeans: {}", same(&by_col, direct.iter())?);

    let extremes = toolkit.apply(&matrix.clone().into_dyn(), &[Axis(0)], range, &aux)?;
    if let Some(a) = extremes.as_array() {
        println!("apply(x, 1, range) has shape {:?}", a.shape());
    }

    let cube = Array::from_shape_fn(IxDyn(&[2, 2, 10]), |idx| {
        (idx[0] + 2 * idx[1]) as f64 + idx[2] as f64 / 10.0
    });
    let collapsed = toolkit.apply(&cube, &[Axis(0), Axis(1)], mean, &aux)?;
    let means = collapsed
        .to_f64()
        .ok_or_else(|| anyhow!("array means are not numeric"))?;
    println!("apply(a, c(1, 2), mean)\n{}\n", means);
    Ok(())
}

fn same<'a>(applied: &MarginApplied, expected: impl Iterator<Item = &'a f64>) -> Result<bool> {
    let got = applied
        .to_f64()
        .ok_or_else(|| anyhow!("margin results are not numeric"))?;
    Ok(got
        .iter()
        .zip(expected)
        .all(|(a, b)| (a - b).abs() < 1e-12))
}

/// `split`, `tapply` and `unsplit` over generated factor levels.
pub fn groups(toolkit: &Toolkit, seed: u64) -> Result<()> {
    info!(seed, "Section: groups");
    let mut rng = SimRng::from_seed(seed);
    let mut values = rng.rnorm(10, 0.0, 1.0)?;
    values.extend(rng.runif(10, 0.0, 1.0)?);
    values.extend(rng.rnorm(10, 1.0, 1.0)?);
    let data = Container::new(values);
    let key = Factor::generate(3, 10, 30);

    let parts = toolkit.split(&data, std::slice::from_ref(&key))?;
    for group in &parts {
        println!("group {}: {} values", group.label, group.values.len());
    }

    let means = toolkit.tapply(&data, std::slice::from_ref(&key), mean, &Params::new())?;
    println!("tapply(x, f, mean)\n{}", render(&means));

    let ranges = toolkit.tapply(&data, std::slice::from_ref(&key), range, &Params::new())?;
    println!("tapply(x, f, range)\n{}", render(&ranges));

    let restored = unsplit(&parts, &key)?;
    println!("unsplit restores the input: {}\n", restored == data);

    let gender = toolkit.factor(&["f", "m", "f", "m", "f", "m"]);
    let arm = toolkit.factor(&["a", "a", "b", "b", "b", "b"]);
    let small = Container::new(vec![3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
    let crossed = toolkit.split(&small, &[gender, arm])?;
    println!("split by two keys: {:?}\n", crossed.labels());
    Ok(())
}

/// `mapply` over two parallel containers.
pub fn mapply(toolkit: &Toolkit) -> Result<()> {
    info!("Section: mapply");
    let items: Container<Value> = (1..=4).map(|i| Value::from(i as i64)).collect();
    let times: Container<Value> = (1..=4).rev().map(|i| Value::from(i as i64)).collect();

    let repeated = toolkit.mapply(
        &[items, times],
        |args: &[Value], _: &Params| {
            let item = args[0].as_scalar().ok_or("item")?.clone();
            let times = args[1].as_f64().ok_or("times")? as usize;
            Ok(Value::vector(vec![item; times]))
        },
        &Params::new(),
    )?;
    println!("mapply(rep, 1:4, 4:1)\n{}", render(&repeated));

    let means: Container<Value> = vec![Value::from(0.0), Value::from(10.0)].into();
    let sds: Container<Value> = vec![Value::from(1.0), Value::from(2.0)].into();
    let offsets = toolkit.mapply(
        &[means, sds],
        |args: &[Value], aux: &Params| {
            let shift = aux.get_f64("shift")?;
            let mean = args[0].as_f64().ok_or("mean")?;
            let sd = args[1].as_f64().ok_or("sd")?;
            Ok(Value::vector([mean + shift - sd, mean + shift + sd]))
        },
        &Params::new().with("shift", 0.5),
    )?;
    println!("mapply(band, mean, sd, shift = 0.5)\n{}", render(&offsets));
    Ok(())
}

/// Seeded draws, sampling and reproducibility.
pub fn simulate(seed: u64) -> Result<()> {
    info!(seed, "Section: simulate");
    let mut rng = SimRng::from_seed(seed);

    let normals = rng.rnorm(5, 0.0, 1.0)?;
    println!("rnorm(5) = {:.4?}", normals);
    println!("rpois(10, 1) = {:?}", rng.rpois(10, 1.0)?);
    println!("rbinom(10, 1, 0.5) = {:?}", rng.rbinom(10, 1, 0.5)?);
    println!("runif(3, 2, 4) = {:.4?}", rng.runif(3, 2.0, 4.0)?);

    let population: Vec<i64> = (1..=10).collect();
    println!("sample(1:10, 4) = {:?}", rng.sample(&population, 4, false, None)?);
    println!("sample(1:10) = {:?}", rng.sample(&population, 10, false, None)?);
    println!(
        "sample(1:10, replace = TRUE) = {:?}",
        rng.sample(&population, 10, true, None)?
    );
    let coin = rng.sample(&["H", "T"], 10, true, Some(&[0.7, 0.3][..]))?;
    println!("weighted coin = {:?}", coin);
    println!("permutation(5) = {:?}", rng.permutation(5));

    rng.set_seed(seed);
    let again = rng.rnorm(5, 0.0, 1.0)?;
    println!("reseeding reproduces rnorm(5): {}\n", again == normals);

    // Linear model y = 0.5 + 2x + e with x ~ Binomial(1, 0.5)
    rng.set_seed(seed);
    let x = rng.rbinom(100, 1, 0.5)?;
    let e = rng.rnorm(100, 0.0, 2.0)?;
    let y: Vec<f64> = x
        .iter()
        .zip(&e)
        .map(|(&xi, &ei)| 0.5 + 2.0 * xi as f64 + ei)
        .collect();
    let summary = summarise(&y);
    println!("y summary: min={:.3} mean={:.3} max={:.3}", summary[0], summary[1], summary[2]);
    Ok(())
}

fn summarise(values: &[f64]) -> [f64; 3] {
    let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mean = values.iter().sum::<f64>() / values.len().max(1) as f64;
    [lo, mean, hi]
}
