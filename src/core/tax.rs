//! Japanese tax calculators: progressive income tax, fixed asset tax and
//! automobile tax.
//!
//! Income and property amounts are in units of 10,000 yen (万円); automobile
//! tax is in yen.

use super::error::{ValidationError, parse_number, parse_positive};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Deduction applied when the user leaves the field empty or unparsable.
pub const DEFAULT_DEDUCTION: f64 = 120.0;

/// Resident tax: income-linked part.
pub const RESIDENT_TAX_RATE: f64 = 0.10;

/// Resident tax: per-capita part (5,000 yen).
pub const RESIDENT_TAX_PER_CAPITA: f64 = 0.5;

/// Special reconstruction income tax, as a share of income tax.
pub const SURTAX_RATE: f64 = 0.021;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub upper_bound: f64,
    pub rate: f64,
    pub subtraction: f64,
}

impl TaxBracket {
    const fn new(upper_bound: f64, rate: f64, subtraction: f64) -> Self {
        Self {
            upper_bound,
            rate,
            subtraction,
        }
    }

    pub fn tax_for(&self, taxable: f64) -> f64 {
        (taxable * self.rate - self.subtraction).max(0.0)
    }
}

/// National income tax brackets, ascending. The last bound is unbounded so
/// every non-negative amount lands in exactly one bracket.
pub const INCOME_TAX_BRACKETS: [TaxBracket; 7] = [
    TaxBracket::new(195.0, 0.05, 0.0),
    TaxBracket::new(330.0, 0.10, 9.75),
    TaxBracket::new(695.0, 0.20, 42.75),
    TaxBracket::new(900.0, 0.23, 63.6),
    TaxBracket::new(1800.0, 0.33, 153.6),
    TaxBracket::new(4000.0, 0.40, 279.6),
    TaxBracket::new(f64::INFINITY, 0.45, 479.6),
];

/// Returns the first bracket whose upper bound is at or above `taxable`.
pub fn find_bracket(brackets: &[TaxBracket], taxable: f64) -> Option<&TaxBracket> {
    brackets.iter().find(|b| taxable <= b.upper_bound)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IncomeTaxBreakdown {
    pub income: f64,
    pub deduction: f64,
    pub taxable_income: f64,
    pub bracket: TaxBracket,
    pub income_tax: f64,
    pub resident_tax: f64,
    pub surtax: f64,
    pub total_tax: f64,
    pub net_income: f64,
    /// Total tax as a percentage of gross income.
    pub effective_rate: f64,
}

/// Computes the tax breakdown for already-validated numbers.
pub fn income_tax(income: f64, deduction: f64) -> IncomeTaxBreakdown {
    let taxable_income = (income - deduction).max(0.0);
    // The last bracket is unbounded, so the lookup only misses on NaN.
    let bracket = *find_bracket(&INCOME_TAX_BRACKETS, taxable_income)
        .unwrap_or(&INCOME_TAX_BRACKETS[INCOME_TAX_BRACKETS.len() - 1]);
    let income_tax = bracket.tax_for(taxable_income);

    let resident_tax = if taxable_income > 0.0 {
        taxable_income * RESIDENT_TAX_RATE + RESIDENT_TAX_PER_CAPITA
    } else {
        0.0
    };
    let surtax = income_tax * SURTAX_RATE;
    let total_tax = income_tax + resident_tax + surtax;
    let effective_rate = if income > 0.0 {
        total_tax / income * 100.0
    } else {
        0.0
    };

    IncomeTaxBreakdown {
        income,
        deduction,
        taxable_income,
        bracket,
        income_tax,
        resident_tax,
        surtax,
        total_tax,
        net_income: income - total_tax,
        effective_rate,
    }
}

/// Validates raw form input and computes the income tax breakdown.
///
/// A missing or non-numeric deduction falls back to `default_deduction`.
pub fn calculate_income_tax(
    income: &str,
    deduction: Option<&str>,
    default_deduction: f64,
) -> Result<IncomeTaxBreakdown, ValidationError> {
    let income = parse_positive(income, ValidationError::InvalidIncome)?;
    let deduction = deduction
        .and_then(parse_number)
        .unwrap_or(default_deduction);
    Ok(income_tax(income, deduction))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyType {
    ResidentialSmall,
    Residential,
    Commercial,
    Building,
}

impl PropertyType {
    /// Fraction of the assessed value that is taxed.
    fn taxable_share(&self) -> f64 {
        match self {
            PropertyType::ResidentialSmall => 1.0 / 6.0,
            PropertyType::Residential => 1.0 / 3.0,
            PropertyType::Commercial | PropertyType::Building => 1.0,
        }
    }

    pub fn reduction_label(&self) -> &'static str {
        match self {
            PropertyType::ResidentialSmall => "Small residential land special rule (1/6)",
            PropertyType::Residential => "General residential land special rule (1/3)",
            PropertyType::Commercial | PropertyType::Building => "No reduction",
        }
    }

    pub fn is_residential(&self) -> bool {
        matches!(
            self,
            PropertyType::ResidentialSmall | PropertyType::Residential
        )
    }
}

impl FromStr for PropertyType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "residential-small" => Ok(PropertyType::ResidentialSmall),
            "residential" => Ok(PropertyType::Residential),
            "commercial" => Ok(PropertyType::Commercial),
            "building" => Ok(PropertyType::Building),
            _ => Err(ValidationError::UnknownOption {
                kind: "property type",
                value: s.to_string(),
            }),
        }
    }
}

pub const FIXED_ASSET_TAX_RATE: f64 = 0.014;
pub const CITY_PLANNING_TAX_RATE: f64 = 0.003;

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyTaxBreakdown {
    pub assessed_value: f64,
    pub property_type: PropertyType,
    pub taxable_value: f64,
    pub fixed_asset_tax: f64,
    pub city_planning_tax: f64,
    pub total_tax: f64,
}

pub fn calculate_property_tax(
    assessed_value: &str,
    property_type: PropertyType,
) -> Result<PropertyTaxBreakdown, ValidationError> {
    let assessed_value = parse_positive(assessed_value, ValidationError::InvalidPropertyValue)?;
    let taxable_value = assessed_value * property_type.taxable_share();
    let fixed_asset_tax = taxable_value * FIXED_ASSET_TAX_RATE;
    // City planning tax only applies to residential land.
    let city_planning_tax = if property_type.is_residential() {
        taxable_value * CITY_PLANNING_TAX_RATE
    } else {
        0.0
    };

    Ok(PropertyTaxBreakdown {
        assessed_value,
        property_type,
        taxable_value,
        fixed_asset_tax,
        city_planning_tax,
        total_tax: fixed_asset_tax + city_planning_tax,
    })
}

/// Automobile class by engine displacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarClass {
    Kei,
    UpTo1000,
    UpTo1500,
    UpTo2000,
    UpTo2500,
    UpTo3000,
    UpTo3500,
    UpTo4000,
    UpTo4500,
    UpTo6000,
    Over6000,
}

impl CarClass {
    /// Annual base tax in yen.
    pub fn base_tax(&self) -> u32 {
        match self {
            CarClass::Kei => 10_800,
            CarClass::UpTo1000 => 25_000,
            CarClass::UpTo1500 => 30_500,
            CarClass::UpTo2000 => 36_000,
            CarClass::UpTo2500 => 43_500,
            CarClass::UpTo3000 => 50_000,
            CarClass::UpTo3500 => 57_000,
            CarClass::UpTo4000 => 64_500,
            CarClass::UpTo4500 => 74_500,
            CarClass::UpTo6000 => 86_000,
            CarClass::Over6000 => 111_000,
        }
    }
}

impl Display for CarClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cc = match self {
            CarClass::Kei => return write!(f, "Kei car"),
            CarClass::Over6000 => return write!(f, "Passenger car over 6000cc"),
            CarClass::UpTo1000 => 1000,
            CarClass::UpTo1500 => 1500,
            CarClass::UpTo2000 => 2000,
            CarClass::UpTo2500 => 2500,
            CarClass::UpTo3000 => 3000,
            CarClass::UpTo3500 => 3500,
            CarClass::UpTo4000 => 4000,
            CarClass::UpTo4500 => 4500,
            CarClass::UpTo6000 => 6000,
        };
        write!(f, "Passenger car up to {cc}cc")
    }
}

impl FromStr for CarClass {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "kei" => Ok(CarClass::Kei),
            "1000" => Ok(CarClass::UpTo1000),
            "1500" => Ok(CarClass::UpTo1500),
            "2000" => Ok(CarClass::UpTo2000),
            "2500" => Ok(CarClass::UpTo2500),
            "3000" => Ok(CarClass::UpTo3000),
            "3500" => Ok(CarClass::UpTo3500),
            "4000" => Ok(CarClass::UpTo4000),
            "4500" => Ok(CarClass::UpTo4500),
            "6000" => Ok(CarClass::UpTo6000),
            "6001" => Ok(CarClass::Over6000),
            _ => Err(ValidationError::UnknownOption {
                kind: "car class",
                value: s.to_string(),
            }),
        }
    }
}

/// Whether the car is past the 13-year heavier-taxation threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarAge {
    Standard,
    Over13Years,
}

impl FromStr for CarAge {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "new" | "standard" => Ok(CarAge::Standard),
            "old" => Ok(CarAge::Over13Years),
            _ => Err(ValidationError::UnknownOption {
                kind: "car age",
                value: s.to_string(),
            }),
        }
    }
}

/// Heavier tax for kei cars older than 13 years, in yen.
pub const OLD_KEI_TAX: u32 = 12_900;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarTaxBreakdown {
    pub class: CarClass,
    pub age: CarAge,
    pub base_tax: u32,
    pub final_tax: u32,
}

pub fn calculate_car_tax(class: CarClass, age: CarAge) -> CarTaxBreakdown {
    let base_tax = class.base_tax();
    let final_tax = match (age, class) {
        (CarAge::Standard, _) => base_tax,
        (CarAge::Over13Years, CarClass::Kei) => OLD_KEI_TAX,
        // 15% surcharge, rounded down to the yen in integer arithmetic
        (CarAge::Over13Years, _) => base_tax * 115 / 100,
    };
    CarTaxBreakdown {
        class,
        age,
        base_tax,
        final_tax,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_income_tax_example() {
        let result = calculate_income_tax("500", None, DEFAULT_DEDUCTION).unwrap();
        assert_eq!(result.taxable_income, 380.0);
        assert_eq!(result.bracket.rate, 0.20);
        assert_eq!(result.bracket.subtraction, 42.75);
        assert!(approx(result.income_tax, 33.25));
        assert!(approx(result.resident_tax, 38.5));
        assert!(approx(result.surtax, 0.69825));
        assert!((result.total_tax - 72.45).abs() < 0.01);
        assert!(approx(result.net_income, 500.0 - result.total_tax));
        assert!((result.effective_rate - 14.49).abs() < 0.01);
    }

    #[test]
    fn test_deduction_defaults_when_absent_or_invalid() {
        let absent = calculate_income_tax("500", None, DEFAULT_DEDUCTION).unwrap();
        let invalid = calculate_income_tax("500", Some("abc"), DEFAULT_DEDUCTION).unwrap();
        let explicit = calculate_income_tax("500", Some("200"), DEFAULT_DEDUCTION).unwrap();
        assert_eq!(absent.deduction, 120.0);
        assert_eq!(invalid.deduction, 120.0);
        assert_eq!(explicit.deduction, 200.0);
        assert_eq!(explicit.taxable_income, 300.0);
    }

    #[test]
    fn test_invalid_income_is_rejected() {
        for input in ["", "abc", "0", "-100"] {
            let err = calculate_income_tax(input, None, DEFAULT_DEDUCTION).unwrap_err();
            assert_eq!(err, ValidationError::InvalidIncome(input.to_string()));
        }
    }

    #[test]
    fn test_income_below_deduction_is_tax_free() {
        let result = income_tax(100.0, 120.0);
        assert_eq!(result.taxable_income, 0.0);
        assert_eq!(result.income_tax, 0.0);
        assert_eq!(result.resident_tax, 0.0);
        assert_eq!(result.total_tax, 0.0);
        assert_eq!(result.net_income, 100.0);
    }

    #[test]
    fn test_bracket_boundaries() {
        assert_eq!(find_bracket(&INCOME_TAX_BRACKETS, 0.0).unwrap().rate, 0.05);
        assert_eq!(find_bracket(&INCOME_TAX_BRACKETS, 195.0).unwrap().rate, 0.05);
        assert_eq!(find_bracket(&INCOME_TAX_BRACKETS, 195.01).unwrap().rate, 0.10);
        assert_eq!(find_bracket(&INCOME_TAX_BRACKETS, 4000.0).unwrap().rate, 0.40);
        assert_eq!(find_bracket(&INCOME_TAX_BRACKETS, 1e9).unwrap().rate, 0.45);
    }

    #[test]
    fn test_income_tax_is_non_negative_and_monotonic() {
        let mut previous = 0.0;
        let mut taxable = 0.0;
        while taxable <= 6000.0 {
            let tax = income_tax(taxable, 0.0).income_tax;
            assert!(tax >= 0.0, "negative tax at {taxable}");
            // Subtraction constants are rounded, allow for that at the seams.
            assert!(
                tax + 1e-6 >= previous,
                "tax decreased at {taxable}: {previous} -> {tax}"
            );
            previous = tax;
            taxable += 0.25;
        }
    }

    #[test]
    fn test_property_tax() {
        let small = calculate_property_tax("600", PropertyType::ResidentialSmall).unwrap();
        assert!(approx(small.taxable_value, 100.0));
        assert!(approx(small.fixed_asset_tax, 1.4));
        assert!(approx(small.city_planning_tax, 0.3));
        assert!(approx(small.total_tax, 1.7));

        let commercial = calculate_property_tax("1000", PropertyType::Commercial).unwrap();
        assert!(approx(commercial.taxable_value, 1000.0));
        assert!(approx(commercial.fixed_asset_tax, 14.0));
        assert_eq!(commercial.city_planning_tax, 0.0);

        assert!(calculate_property_tax("-1", PropertyType::Building).is_err());
    }

    #[test]
    fn test_property_type_parsing() {
        assert_eq!(
            "residential-small".parse::<PropertyType>().unwrap(),
            PropertyType::ResidentialSmall
        );
        assert!("castle".parse::<PropertyType>().is_err());
    }

    #[test]
    fn test_car_tax() {
        let standard = calculate_car_tax(CarClass::UpTo2000, CarAge::Standard);
        assert_eq!(standard.final_tax, 36_000);

        let old = calculate_car_tax(CarClass::UpTo1500, CarAge::Over13Years);
        assert_eq!(old.base_tax, 30_500);
        assert_eq!(old.final_tax, 35_075);

        // Integer arithmetic keeps 43,500 * 1.15 at exactly 50,025
        let old_2500 = calculate_car_tax(CarClass::UpTo2500, CarAge::Over13Years);
        assert_eq!(old_2500.final_tax, 50_025);

        let old_kei = calculate_car_tax(CarClass::Kei, CarAge::Over13Years);
        assert_eq!(old_kei.base_tax, 10_800);
        assert_eq!(old_kei.final_tax, OLD_KEI_TAX);
    }

    #[test]
    fn test_car_class_parsing() {
        assert_eq!("6001".parse::<CarClass>().unwrap(), CarClass::Over6000);
        assert_eq!("KEI".parse::<CarClass>().unwrap(), CarClass::Kei);
        assert!("7000".parse::<CarClass>().is_err());
        assert_eq!("old".parse::<CarAge>().unwrap(), CarAge::Over13Years);
    }
}
