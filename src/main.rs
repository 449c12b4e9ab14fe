use anyhow::Result;
use log::LevelFilter;
use rand::thread_rng;
use rand_distr::Uniform;
use tensor3d::{Matrix, Tensor};

fn print_rule() {
    println!("- - - - - - - - - - - - - - - -");
}

fn section(title: &str) {
    print_rule();
    println!("{}", title);
    print_rule();
}

fn matrix_ops() -> Result<()> {
    section("Part 1: Matrix Operations (Random)");

    let mut rng = thread_rng();
    let size = 2;
    // Whole numbers 1..=10.
    let a = Matrix::rand(size, size, Uniform::new(1.0_f64, 11.0), &mut rng).map(|_, v| v.floor());
    let b = Matrix::rand(size, size, Uniform::new(1.0_f64, 11.0), &mut rng).map(|_, v| v.floor());

    println!("Matrix A (Random):\n{}", a);
    println!("Matrix B (Random):\n{}", b);
    println!("(A+B):\n{}", a.add(&b)?);
    println!("(A*B):\n{}", a.matmul(&b)?);
    println!("Transpose of A:\n{}", a.transpose());

    Ok(())
}

fn portfolio() -> Result<Tensor<f64>> {
    section("Part 2: Tensor x Matrix (Random Data)");

    let (stocks, days, features) = (2, 3, 4);
    let prices = Tensor::rand(
        stocks,
        days,
        features,
        Uniform::new(50.0_f64, 150.0),
        &mut thread_rng(),
    )
    .map(|_, v| v.floor());
    println!("Portfolio (random):\n{}", prices);

    // Columns: typical price, range. Rows: open, high, low, close.
    let weights = Matrix::from([[0.0, 0.0], [0.5, 1.0], [0.5, -1.0], [0.0, 0.0]]);
    println!("Weights Matrix:\n{}", weights);

    let high = prices.get(0, 0, 1)?;
    let low = prices.get(0, 0, 2)?;
    println!("--Verification Logic--");
    println!("Input High: {}, Input Low: {}", high, low);
    println!("Expected Typical price (avg.): {}", (high + low) / 2.0);
    println!("Expected fluctuation (range): {}", high - low);

    let result = prices.matmul(&weights)?;
    log::info!("projected portfolio to {:?}", result.shape());
    println!("\nProgram Result:\n{}", result);

    Ok(prices)
}

fn elementwise() -> Result<()> {
    section("Part 3: Tensor Addition & Elementwise Multiplication");

    let t1 = Tensor::from([[[1.0, 2.0], [3.0, 4.0]], [[5.0, 6.0], [7.0, 8.0]]]);
    let t2 = Tensor::from([[[10.0, 20.0], [30.0, 40.0]], [[2.0, 3.0], [4.0, 5.0]]]);
    println!("Tensor T1:\n{}", t1);
    println!("Tensor T2:\n{}", t2);
    println!("T1 + T2 (Elementwise Addition):\n{}", t1.add(&t2)?);
    println!(
        "T1 .* T2 (Elementwise Multiplication):\n{}",
        t1.elementwise_mul(&t2)?
    );

    Ok(())
}

fn reshape_and_errors(mut prices: Tensor<f64>) -> Result<()> {
    section("Part 4: Reshaping and Error catching");

    println!("Reshaping Tensor from (2,3,4) to (3,2,4)...");
    prices.reshape(3, 2, 4)?;
    println!("{}", prices);

    println!("Testing invalid addition (2x2 + 3x3)...");
    let m1: Matrix<f64> = Matrix::zeros(2, 2);
    let m2: Matrix<f64> = Matrix::zeros(3, 3);
    match m1.add(&m2) {
        Ok(_) => log::warn!("mismatched addition unexpectedly succeeded"),
        Err(e) => println!("Caught Error -> {}", e),
    }

    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Warn)
        .parse_env(env_logger::Env::default().filter_or("TENSOR3D_LOG", "warn"))
        .init();

    matrix_ops()?;
    let prices = portfolio()?;
    elementwise()?;
    reshape_and_errors(prices)?;

    Ok(())
}
