use deunicode::deunicode;
use itertools::Itertools;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum County {
    Mombasa,
    Kwale,
    Kilifi,
    TanaRiver,
    Lamu,
    TaitaTaveta,
    Garissa,
    Wajir,
    Mandera,
    Marsabit,
    Isiolo,
    Meru,
    TharakaNithi,
    Embu,
    Kitui,
    Machakos,
    Makueni,
    Nyandarua,
    Nyeri,
    Kirinyaga,
    Muranga,
    Kiambu,
    Turkana,
    WestPokot,
    Samburu,
    TransNzoia,
    UasinGishu,
    ElgeyoMarakwet,
    Nandi,
    Baringo,
    Laikipia,
    Nakuru,
    Narok,
    Kajiado,
    Kericho,
    Bomet,
    Kakamega,
    Vihiga,
    Bungoma,
    Busia,
    Siaya,
    Kisumu,
    HomaBay,
    Migori,
    Kisii,
    Nyamira,
    Nairobi,
}

impl County {
    pub const ALL: [County; 47] = [
        County::Mombasa,
        County::Kwale,
        County::Kilifi,
        County::TanaRiver,
        County::Lamu,
        County::TaitaTaveta,
        County::Garissa,
        County::Wajir,
        County::Mandera,
        County::Marsabit,
        County::Isiolo,
        County::Meru,
        County::TharakaNithi,
        County::Embu,
        County::Kitui,
        County::Machakos,
        County::Makueni,
        County::Nyandarua,
        County::Nyeri,
        County::Kirinyaga,
        County::Muranga,
        County::Kiambu,
        County::Turkana,
        County::WestPokot,
        County::Samburu,
        County::TransNzoia,
        County::UasinGishu,
        County::ElgeyoMarakwet,
        County::Nandi,
        County::Baringo,
        County::Laikipia,
        County::Nakuru,
        County::Narok,
        County::Kajiado,
        County::Kericho,
        County::Bomet,
        County::Kakamega,
        County::Vihiga,
        County::Bungoma,
        County::Busia,
        County::Siaya,
        County::Kisumu,
        County::HomaBay,
        County::Migori,
        County::Kisii,
        County::Nyamira,
        County::Nairobi,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            County::Mombasa => "Mombasa",
            County::Kwale => "Kwale",
            County::Kilifi => "Kilifi",
            County::TanaRiver => "Tana River",
            County::Lamu => "Lamu",
            County::TaitaTaveta => "Taita Taveta",
            County::Garissa => "Garissa",
            County::Wajir => "Wajir",
            County::Mandera => "Mandera",
            County::Marsabit => "Marsabit",
            County::Isiolo => "Isiolo",
            County::Meru => "Meru",
            County::TharakaNithi => "Tharaka Nithi",
            County::Embu => "Embu",
            County::Kitui => "Kitui",
            County::Machakos => "Machakos",
            County::Makueni => "Makueni",
            County::Nyandarua => "Nyandarua",
            County::Nyeri => "Nyeri",
            County::Kirinyaga => "Kirinyaga",
            County::Muranga => "Murang'a",
            County::Kiambu => "Kiambu",
            County::Turkana => "Turkana",
            County::WestPokot => "West Pokot",
            County::Samburu => "Samburu",
            County::TransNzoia => "Trans Nzoia",
            County::UasinGishu => "Uasin Gishu",
            County::ElgeyoMarakwet => "Elgeyo Marakwet",
            County::Nandi => "Nandi",
            County::Baringo => "Baringo",
            County::Laikipia => "Laikipia",
            County::Nakuru => "Nakuru",
            County::Narok => "Narok",
            County::Kajiado => "Kajiado",
            County::Kericho => "Kericho",
            County::Bomet => "Bomet",
            County::Kakamega => "Kakamega",
            County::Vihiga => "Vihiga",
            County::Bungoma => "Bungoma",
            County::Busia => "Busia",
            County::Siaya => "Siaya",
            County::Kisumu => "Kisumu",
            County::HomaBay => "Homa Bay",
            County::Migori => "Migori",
            County::Kisii => "Kisii",
            County::Nyamira => "Nyamira",
            County::Nairobi => "Nairobi",
        }
    }

    /// Shorthands geocoders and users commonly produce for a county.
    fn aliases(&self) -> &'static [&'static str] {
        match self {
            County::Nairobi => &["Nairobi City"],
            County::TanaRiver => &["Tana"],
            County::TaitaTaveta => &["Taita"],
            County::TharakaNithi => &["Tharaka"],
            County::UasinGishu => &["Uasin"],
            County::ElgeyoMarakwet => &["Elgeyo"],
            County::HomaBay => &["Homa"],
            _ => &[],
        }
    }
}

impl Display for County {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl From<County> for &'static str {
    fn from(county: County) -> Self {
        county.name()
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0:?} is not one of the 47 counties")]
pub struct UnknownCounty(pub String);

impl FromStr for County {
    type Err = UnknownCounty;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        normalize_county(value).ok_or_else(|| UnknownCounty(value.to_owned()))
    }
}

impl TryFrom<String> for County {
    type Error = UnknownCounty;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

const SEPARATORS: [char; 4] = [',', '/', '|', '-'];

lazy_static! {
    static ref COUNTY_KEYS: HashMap<String, County> = County::ALL
        .iter()
        .flat_map(|county| {
            std::iter::once(county.name())
                .chain(county.aliases().iter().copied())
                .map(move |name| (comparison_key(name), *county))
        })
        .collect();
}

/// Case, accent, punctuation and whitespace insensitive form of a place name.
fn comparison_key(value: &str) -> String {
    deunicode(value)
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn strip_county_word(value: &str) -> String {
    value
        .split_whitespace()
        .filter(|word| !word.eq_ignore_ascii_case("county"))
        .join(" ")
}

fn match_county(value: &str) -> Option<County> {
    let key = comparison_key(value);
    if key.is_empty() {
        return None;
    }
    COUNTY_KEYS.get(&key).copied()
}

/// Maps free text such as `"Westlands, Nairobi County, Kenya"` to a canonical county.
///
/// Segments split on `, / | -` are tried in order, then the whole string with the
/// word "county" removed, then the raw string. `None` means the text names none of
/// the 47 counties and the targeting is incomplete.
pub fn normalize_county(input: &str) -> Option<County> {
    input
        .split(SEPARATORS.as_slice())
        .map(|segment| strip_county_word(segment.trim()))
        .find_map(|segment| match_county(&segment))
        .or_else(|| match_county(&strip_county_word(input)))
        .or_else(|| match_county(input))
}

/// Address fields as returned by the reverse geocoder. Only the administrative
/// and settlement levels are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressComponents {
    pub county: Option<String>,
    pub state: Option<String>,
    pub state_district: Option<String>,
    pub region: Option<String>,
    pub province: Option<String>,
    pub city: Option<String>,
    pub town: Option<String>,
    pub village: Option<String>,
    pub hamlet: Option<String>,
    pub suburb: Option<String>,
}

impl AddressComponents {
    /// Administrative levels first, then settlements, each normalized on its own.
    pub fn county(&self) -> Option<County> {
        [
            &self.county,
            &self.state,
            &self.state_district,
            &self.region,
            &self.province,
            &self.city,
            &self.town,
            &self.village,
            &self.hamlet,
            &self.suburb,
        ]
        .into_iter()
        .flatten()
        .find_map(|field| normalize_county(field))
    }
}
