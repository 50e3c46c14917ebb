use crate::error::Error;
use hashbrown::HashMap;

/// A unary function usable in expressions
pub type Function = fn(f64) -> Result<f64, Error>;

lazy_static! {
    /// The functions known by default in every
    /// [`Environment`](struct.Environment.html).
    ///
    /// Forward trigonometric functions take their argument in degrees, and
    /// inverse ones (`asin`, `acos`, `atan`, `asinh`, `acosh`) return degrees.
    /// `atanh` is the exception and returns radians.
    pub static ref FUNCTIONS: HashMap<String, Function> = {
        let mut map = HashMap::<String, Function>::new();
        map.insert("sin".into(), sin);
        map.insert("cos".into(), cos);
        map.insert("tan".into(), tan);
        map.insert("asin".into(), asin);
        map.insert("acos".into(), acos);
        map.insert("atan".into(), atan);
        map.insert("sinh".into(), sinh);
        map.insert("cosh".into(), cosh);
        map.insert("tanh".into(), tanh);
        map.insert("asinh".into(), asinh);
        map.insert("acosh".into(), acosh);
        map.insert("atanh".into(), atanh);
        map.insert("log".into(), log);
        map.insert("sqrt".into(), sqrt);
        map.insert("exp".into(), exp);
        map.insert("abs".into(), abs);
        map.insert("round".into(), round);
        map.insert("ceil".into(), ceil);
        map.insert("floor".into(), floor);
        map.insert("factorial".into(), factorial);
        map.shrink_to_fit();
        map
    };
}

/// Largest argument of `factorial` with a finite `f64` result
const MAX_FACTORIAL: f64 = 170.0;

fn sin(x: f64) -> Result<f64, Error> {
    Ok(libm::sin(x.to_radians()))
}

fn cos(x: f64) -> Result<f64, Error> {
    Ok(libm::cos(x.to_radians()))
}

fn tan(x: f64) -> Result<f64, Error> {
    Ok(libm::tan(x.to_radians()))
}

fn asin(x: f64) -> Result<f64, Error> {
    if !(-1.0..=1.0).contains(&x) {
        return Err(Error::domain("asin", "argument must be between -1 and 1"));
    }
    Ok(libm::asin(x).to_degrees())
}

fn acos(x: f64) -> Result<f64, Error> {
    if !(-1.0..=1.0).contains(&x) {
        return Err(Error::domain("acos", "argument must be between -1 and 1"));
    }
    Ok(libm::acos(x).to_degrees())
}

fn atan(x: f64) -> Result<f64, Error> {
    Ok(libm::atan(x).to_degrees())
}

fn sinh(x: f64) -> Result<f64, Error> {
    Ok(libm::sinh(x))
}

fn cosh(x: f64) -> Result<f64, Error> {
    Ok(libm::cosh(x))
}

fn tanh(x: f64) -> Result<f64, Error> {
    Ok(libm::tanh(x))
}

fn asinh(x: f64) -> Result<f64, Error> {
    Ok(libm::asinh(x).to_degrees())
}

fn acosh(x: f64) -> Result<f64, Error> {
    if x < 1.0 {
        return Err(Error::domain("acosh", "argument must be at least 1"));
    }
    Ok(libm::acosh(x).to_degrees())
}

// Unlike its siblings, no conversion to degrees.
fn atanh(x: f64) -> Result<f64, Error> {
    if x <= -1.0 || x >= 1.0 {
        return Err(Error::domain(
            "atanh",
            "argument must be strictly between -1 and 1",
        ));
    }
    Ok(libm::atanh(x))
}

fn log(x: f64) -> Result<f64, Error> {
    if x <= 0.0 {
        return Err(Error::domain("log", "argument must be positive"));
    }
    Ok(libm::log(x))
}

fn sqrt(x: f64) -> Result<f64, Error> {
    if x < 0.0 {
        return Err(Error::domain("sqrt", "argument must not be negative"));
    }
    Ok(libm::sqrt(x))
}

fn exp(x: f64) -> Result<f64, Error> {
    Ok(libm::exp(x))
}

fn abs(x: f64) -> Result<f64, Error> {
    Ok(libm::fabs(x))
}

/// Round half to even
fn round(x: f64) -> Result<f64, Error> {
    Ok(libm::rint(x))
}

fn ceil(x: f64) -> Result<f64, Error> {
    Ok(libm::ceil(x))
}

fn floor(x: f64) -> Result<f64, Error> {
    Ok(libm::floor(x))
}

fn factorial(x: f64) -> Result<f64, Error> {
    if x < 0.0 || x.fract() != 0.0 {
        return Err(Error::domain(
            "factorial",
            "argument must be a non-negative integer",
        ));
    }
    if x > MAX_FACTORIAL {
        return Err(Error::domain("factorial", "result is too large"));
    }
    // exact up to 34!, then rounded like any other f64 product
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let n = x as u32;
    let mut exact: u128 = 1;
    let mut k = 2;
    while k <= n {
        match exact.checked_mul(u128::from(k)) {
            Some(product) => exact = product,
            None => break,
        }
        k += 1;
    }
    #[allow(clippy::cast_precision_loss)]
    let mut result = exact as f64;
    while k <= n {
        result *= f64::from(k);
        k += 1;
    }
    Ok(result)
}
