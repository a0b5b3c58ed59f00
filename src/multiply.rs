//! Integer multiplication exercises.

use crate::error::DrillError;
use crate::number::gen_math_int;
use crate::registry::ExerciseKind;
use crate::traits::{Exercise, Verdict, PLACEHOLDER};
use rand::{Rng, RngCore};

/// Check typed input against an integer answer.
pub fn check_int(answer: i64, input: &str) -> (Verdict, Option<String>) {
    match input.trim().parse::<i64>() {
        Ok(x) if x == answer => (Verdict::Correct, None),
        Ok(x) => (Verdict::Error, Some(format!("{x} is Incorrect!"))),
        Err(_) => (Verdict::Invalid, Some(format!("{input} is NOT an integer!"))),
    }
}

/// Parse the `a,b` representation shared by the multiplication exercises.
fn parse_operands(type_tag: &str, repr: &str) -> Result<(i64, i64), DrillError> {
    let malformed = || DrillError::MalformedRepr {
        type_tag: type_tag.to_owned(),
        repr: repr.to_owned(),
    };
    let mut parts = repr.split(',');
    let (a, b) = match (parts.next(), parts.next(), parts.next()) {
        (Some(a), Some(b), None) => (a, b),
        _ => return Err(malformed()),
    };
    let a = a.trim().parse::<i64>().map_err(|_| malformed())?;
    let b = b.trim().parse::<i64>().map_err(|_| malformed())?;
    // The product is shown or checked, it has to fit.
    if a.checked_mul(b).is_none() {
        return Err(malformed());
    }
    Ok((a, b))
}

/// `a x b = ?` in which a and b are both 2-digit integers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TwoByTwo {
    a: i64,
    b: i64,
}

impl TwoByTwo {
    pub const TYPE: &'static str = "Int2X2";
    pub const DESCRIPTION: &'static str = "two 2-digit integers";

    pub fn with_operands(a: i64, b: i64) -> Self {
        TwoByTwo { a, b }
    }

    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Result<Self, DrillError> {
        let a = gen_math_int(rng, 2, None, None)?;
        let b = gen_math_int(rng, 2, None, None)?;
        Ok(TwoByTwo::with_operands(a, b))
    }

    pub fn from_canonical(repr: &str) -> Result<Self, DrillError> {
        let (a, b) = parse_operands(Self::TYPE, repr)?;
        Ok(TwoByTwo::with_operands(a, b))
    }

    pub fn answer(&self) -> i64 {
        self.a * self.b
    }

    pub fn kind() -> ExerciseKind {
        fn generate(rng: &mut dyn RngCore) -> Result<Box<dyn Exercise>, DrillError> {
            Ok(Box::new(TwoByTwo::generate(rng)?))
        }
        fn from_canonical(
            repr: &str,
            _rng: &mut dyn RngCore,
        ) -> Result<Box<dyn Exercise>, DrillError> {
            Ok(Box::new(TwoByTwo::from_canonical(repr)?))
        }
        ExerciseKind {
            tag: Self::TYPE,
            description: Self::DESCRIPTION,
            generate,
            from_canonical,
        }
    }
}

impl Exercise for TwoByTwo {
    fn type_tag(&self) -> &'static str {
        Self::TYPE
    }

    fn description(&self) -> &'static str {
        Self::DESCRIPTION
    }

    fn to_display_string(&self) -> String {
        format!("{} x {} = {PLACEHOLDER}", self.a, self.b)
    }

    fn canonicalize(&self) -> String {
        format!("{},{}", self.a, self.b)
    }

    fn check(&self, input: &str) -> (Verdict, Option<String>) {
        check_int(self.answer(), input)
    }
}

/// The six ways of writing `a x b = c` with one quantity blanked.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Phrasing {
    /// `a x b = ?`
    AxB,
    /// `b x a = ?`
    BxA,
    /// `a x ? = c`
    AxBlank,
    /// `b x ? = c`
    BxBlank,
    /// `? x a = c`
    BlankxA,
    /// `? x b = c`
    BlankxB,
}

impl Phrasing {
    pub const ALL: [Phrasing; 6] = [
        Phrasing::AxB,
        Phrasing::BxA,
        Phrasing::AxBlank,
        Phrasing::BxBlank,
        Phrasing::BlankxA,
        Phrasing::BlankxB,
    ];

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Phrasing::ALL[rng.gen_range(0..Phrasing::ALL.len())]
    }
}

/// `a x b = c` in which a is 1 digit and b is 2 digits below 30. When b is 20 or above, a is
/// only 2 or 3.
///
/// Any of the three quantities may be the blank, see [`Phrasing`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OneByTwo {
    a: i64,
    b: i64,
    phrasing: Phrasing,
}

impl OneByTwo {
    pub const TYPE: &'static str = "Int1X2";
    pub const DESCRIPTION: &'static str = "1-digit or small times up-to-2-digit";
    pub const MAX_B: i64 = 29;

    pub fn with_phrasing(a: i64, b: i64, phrasing: Phrasing) -> Self {
        OneByTwo { a, b, phrasing }
    }

    pub fn with_operands<R: Rng + ?Sized>(a: i64, b: i64, rng: &mut R) -> Self {
        OneByTwo::with_phrasing(a, b, Phrasing::random(rng))
    }

    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Result<Self, DrillError> {
        let b = gen_math_int(rng, 2, None, Some(Self::MAX_B))?;
        let a = if b < 20 {
            gen_math_int(rng, 1, None, None)?
        } else {
            rng.gen_range(2..=3)
        };
        Ok(OneByTwo::with_operands(a, b, rng))
    }

    pub fn from_canonical<R: Rng + ?Sized>(repr: &str, rng: &mut R) -> Result<Self, DrillError> {
        let (a, b) = parse_operands(Self::TYPE, repr)?;
        Ok(OneByTwo::with_operands(a, b, rng))
    }

    pub fn phrasing(&self) -> Phrasing {
        self.phrasing
    }

    /// The quantity hidden behind the placeholder.
    pub fn answer(&self) -> i64 {
        match self.phrasing {
            Phrasing::AxB | Phrasing::BxA => self.a * self.b,
            Phrasing::AxBlank | Phrasing::BlankxA => self.b,
            Phrasing::BxBlank | Phrasing::BlankxB => self.a,
        }
    }

    pub fn kind() -> ExerciseKind {
        fn generate(rng: &mut dyn RngCore) -> Result<Box<dyn Exercise>, DrillError> {
            Ok(Box::new(OneByTwo::generate(rng)?))
        }
        fn from_canonical(
            repr: &str,
            rng: &mut dyn RngCore,
        ) -> Result<Box<dyn Exercise>, DrillError> {
            Ok(Box::new(OneByTwo::from_canonical(repr, rng)?))
        }
        ExerciseKind {
            tag: Self::TYPE,
            description: Self::DESCRIPTION,
            generate,
            from_canonical,
        }
    }
}

impl Exercise for OneByTwo {
    fn type_tag(&self) -> &'static str {
        Self::TYPE
    }

    fn description(&self) -> &'static str {
        Self::DESCRIPTION
    }

    fn to_display_string(&self) -> String {
        let (a, b, c) = (self.a, self.b, self.a * self.b);
        match self.phrasing {
            Phrasing::AxB => format!("{a} x {b} = {PLACEHOLDER}"),
            Phrasing::BxA => format!("{b} x {a} = {PLACEHOLDER}"),
            Phrasing::AxBlank => format!("{a} x {PLACEHOLDER} = {c}"),
            Phrasing::BxBlank => format!("{b} x {PLACEHOLDER} = {c}"),
            Phrasing::BlankxA => format!("{PLACEHOLDER} x {a} = {c}"),
            Phrasing::BlankxB => format!("{PLACEHOLDER} x {b} = {c}"),
        }
    }

    fn canonicalize(&self) -> String {
        format!("{},{}", self.a, self.b)
    }

    fn check(&self, input: &str) -> (Verdict, Option<String>) {
        check_int(self.answer(), input)
    }
}
