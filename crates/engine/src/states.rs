//! Reference table of administrative regions.
//!
//! Each region carries the inclusive postal code range accepted for it and a
//! short list of known cities. The table is built once at startup with
//! [`StateTable::load`] and is read-only afterwards.
use std::collections::BTreeMap;

use serde::Serialize;

use crate::{EngineError, ResultEngine};

/// Number of regions the table must hold.
pub const EXPECTED_STATES: usize = 35;

/// Static source row of the state table.
#[derive(Clone, Copy, Debug)]
pub struct StateEntry {
    pub name: &'static str,
    pub min_code: u32,
    pub max_code: u32,
    pub cities: &'static [&'static str],
}

/// Postal code range and known cities of one region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct StateInfo {
    pub min_code: u32,
    pub max_code: u32,
    pub cities: &'static [&'static str],
}

impl StateInfo {
    /// Returns `true` if `code` falls inside the inclusive range.
    pub fn accepts(&self, code: u32) -> bool {
        (self.min_code..=self.max_code).contains(&code)
    }
}

/// Lookup table keyed by region name, iterated in sorted name order.
#[derive(Clone, Debug)]
pub struct StateTable {
    states: BTreeMap<&'static str, StateInfo>,
}

impl StateTable {
    /// Build the table from the built-in region list.
    pub fn load() -> ResultEngine<Self> {
        Self::from_entries(STATES)
    }

    /// Build the table from `entries`.
    ///
    /// Fails unless there are exactly [`EXPECTED_STATES`] distinct names and
    /// every range is ordered.
    pub fn from_entries(entries: &[StateEntry]) -> ResultEngine<Self> {
        let mut states = BTreeMap::new();
        for entry in entries {
            if entry.min_code > entry.max_code {
                return Err(EngineError::InvalidStateTable(format!(
                    "{} has min code {} above max code {}",
                    entry.name, entry.min_code, entry.max_code
                )));
            }
            let info = StateInfo {
                min_code: entry.min_code,
                max_code: entry.max_code,
                cities: entry.cities,
            };
            if states.insert(entry.name, info).is_some() {
                return Err(EngineError::InvalidStateTable(format!(
                    "{} listed twice",
                    entry.name
                )));
            }
        }

        if states.len() != EXPECTED_STATES {
            return Err(EngineError::InvalidStateTable(format!(
                "table has {} entries, expected {EXPECTED_STATES}",
                states.len()
            )));
        }

        tracing::debug!("loaded {} states", states.len());
        Ok(Self { states })
    }

    pub fn get(&self, name: &str) -> Option<&StateInfo> {
        self.states.get(name.trim())
    }

    /// Inclusive postal code range of `name`.
    ///
    /// An unknown region yields `(0, 0)`, which rejects every real postal
    /// code until a state is picked.
    pub fn postal_range(&self, name: &str) -> (u32, u32) {
        self.get(name)
            .map(|info| (info.min_code, info.max_code))
            .unwrap_or((0, 0))
    }

    /// Region names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.states.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &StateInfo)> + '_ {
        self.states.iter().map(|(name, info)| (*name, info))
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

static STATES: &[StateEntry] = &[
    StateEntry {
        name: "Andaman and Nicobar Islands",
        min_code: 744101,
        max_code: 744304,
        cities: &["Port Blair", "Car Nicobar", "Diglipur", "Rangat", "Mayabunder"],
    },
    StateEntry {
        name: "Andhra Pradesh",
        min_code: 507130,
        max_code: 535594,
        cities: &[
            "Visakhapatnam", "Vijayawada", "Guntur", "Tirupati", "Kurnool", "Kakinada", "Nellore",
            "Rajahmundry",
        ],
    },
    StateEntry {
        name: "Arunachal Pradesh",
        min_code: 790001,
        max_code: 792131,
        cities: &["Itanagar", "Naharlagun", "Pasighat", "Tezpur", "Bomdila", "Ziro"],
    },
    StateEntry {
        name: "Assam",
        min_code: 781001,
        max_code: 788931,
        cities: &[
            "Guwahati", "Silchar", "Dibrugarh", "Jorhat", "Nagaon", "Tinsukia", "Tezpur",
            "Bongaigaon",
        ],
    },
    StateEntry {
        name: "Bihar",
        min_code: 800001,
        max_code: 855117,
        cities: &[
            "Patna", "Gaya", "Muzaffarpur", "Bhagalpur", "Darbhanga", "Purnia", "Arrah",
            "Begusarai",
        ],
    },
    StateEntry {
        name: "Chandigarh",
        min_code: 140119,
        max_code: 160102,
        cities: &["Chandigarh"],
    },
    StateEntry {
        name: "Chhattisgarh",
        min_code: 490001,
        max_code: 497778,
        cities: &["Raipur", "Bhilai", "Bilaspur", "Korba", "Durg", "Rajnandgaon", "Jagdalpur"],
    },
    StateEntry {
        name: "Dadra and Nagar Haveli and Daman and Diu",
        min_code: 362520,
        max_code: 396240,
        cities: &["Daman", "Diu", "Silvassa"],
    },
    StateEntry {
        name: "Delhi",
        min_code: 110001,
        max_code: 110097,
        cities: &["New Delhi", "Delhi", "Dwarka", "Rohini", "Shahdara", "Janakpuri", "Pitampura"],
    },
    StateEntry {
        name: "Goa",
        min_code: 403001,
        max_code: 403806,
        cities: &["Panaji", "Margao", "Vasco da Gama", "Mapusa", "Ponda", "Calangute"],
    },
    StateEntry {
        name: "Gujarat",
        min_code: 360001,
        max_code: 396590,
        cities: &[
            "Ahmedabad", "Surat", "Vadodara", "Rajkot", "Bhavnagar", "Jamnagar", "Gandhinagar",
            "Anand",
        ],
    },
    StateEntry {
        name: "Haryana",
        min_code: 121001,
        max_code: 136156,
        cities: &[
            "Faridabad", "Gurugram", "Panipat", "Ambala", "Yamunanagar", "Rohtak", "Hisar",
            "Karnal",
        ],
    },
    StateEntry {
        name: "Himachal Pradesh",
        min_code: 171001,
        max_code: 177601,
        cities: &["Shimla", "Dharamshala", "Solan", "Mandi", "Kullu", "Hamirpur", "Una"],
    },
    StateEntry {
        name: "Jammu and Kashmir (including Ladakh)",
        min_code: 180001,
        max_code: 194404,
        cities: &["Srinagar", "Jammu", "Leh", "Anantnag", "Baramulla", "Kargil", "Sopore"],
    },
    StateEntry {
        name: "Jharkhand",
        min_code: 813208,
        max_code: 835325,
        cities: &["Ranchi", "Jamshedpur", "Dhanbad", "Bokaro", "Hazaribagh", "Deoghar", "Giridih"],
    },
    StateEntry {
        name: "Karnataka",
        min_code: 560001,
        max_code: 591346,
        cities: &[
            "Bengaluru", "Mysuru", "Hubli", "Mangaluru", "Belagavi", "Davanagere", "Ballari",
            "Tumkur",
        ],
    },
    StateEntry {
        name: "Kerala",
        min_code: 670001,
        max_code: 695615,
        cities: &[
            "Thiruvananthapuram", "Kochi", "Kozhikode", "Thrissur", "Kollam", "Palakkad",
            "Alappuzha", "Kannur",
        ],
    },
    StateEntry {
        name: "Lakshadweep",
        min_code: 682551,
        max_code: 682559,
        cities: &["Kavaratti", "Agatti", "Minicoy", "Amini"],
    },
    StateEntry {
        name: "Madhya Pradesh",
        min_code: 450001,
        max_code: 488448,
        cities: &["Bhopal", "Indore", "Gwalior", "Jabalpur", "Ujjain", "Sagar", "Dewas", "Satna"],
    },
    StateEntry {
        name: "Maharashtra",
        min_code: 400001,
        max_code: 445402,
        cities: &[
            "Mumbai", "Pune", "Nagpur", "Nashik", "Aurangabad", "Solapur", "Thane", "Kolhapur",
            "Amravati",
        ],
    },
    StateEntry {
        name: "Manipur",
        min_code: 795001,
        max_code: 795159,
        cities: &["Imphal", "Thoubal", "Bishnupur", "Churachandpur", "Senapati"],
    },
    StateEntry {
        name: "Meghalaya",
        min_code: 783123,
        max_code: 794115,
        cities: &["Shillong", "Tura", "Jowai", "Nongpoh", "Baghmara"],
    },
    StateEntry {
        name: "Mizoram",
        min_code: 796001,
        max_code: 796901,
        cities: &["Aizawl", "Lunglei", "Champhai", "Serchhip", "Kolasib"],
    },
    StateEntry {
        name: "Nagaland",
        min_code: 797001,
        max_code: 798627,
        cities: &["Kohima", "Dimapur", "Mokokchung", "Tuensang", "Wokha", "Zunheboto"],
    },
    StateEntry {
        name: "Odisha",
        min_code: 751001,
        max_code: 770076,
        cities: &[
            "Bhubaneswar", "Cuttack", "Rourkela", "Berhampur", "Sambalpur", "Puri", "Balasore",
        ],
    },
    StateEntry {
        name: "Puducherry",
        min_code: 533464,
        max_code: 673310,
        cities: &["Puducherry", "Karaikal", "Mahe", "Yanam"],
    },
    StateEntry {
        name: "Punjab",
        min_code: 140001,
        max_code: 160104,
        cities: &[
            "Ludhiana", "Amritsar", "Jalandhar", "Patiala", "Bathinda", "Mohali", "Pathankot",
            "Hoshiarpur",
        ],
    },
    StateEntry {
        name: "Rajasthan",
        min_code: 301001,
        max_code: 345034,
        cities: &["Jaipur", "Jodhpur", "Kota", "Bikaner", "Ajmer", "Udaipur", "Bhilwara", "Alwar"],
    },
    StateEntry {
        name: "Sikkim",
        min_code: 737101,
        max_code: 737139,
        cities: &["Gangtok", "Namchi", "Geyzing", "Mangan"],
    },
    StateEntry {
        name: "Tamil Nadu",
        min_code: 600001,
        max_code: 643253,
        cities: &[
            "Chennai", "Coimbatore", "Madurai", "Tiruchirappalli", "Salem", "Tirunelveli",
            "Vellore", "Erode",
        ],
    },
    StateEntry {
        name: "Telangana",
        min_code: 500001,
        max_code: 509412,
        cities: &[
            "Hyderabad", "Warangal", "Nizamabad", "Karimnagar", "Khammam", "Ramagundam",
            "Mahbubnagar",
        ],
    },
    StateEntry {
        name: "Tripura",
        min_code: 799001,
        max_code: 799290,
        cities: &["Agartala", "Dharmanagar", "Udaipur", "Kailashahar", "Belonia"],
    },
    StateEntry {
        name: "Uttar Pradesh",
        min_code: 201001,
        max_code: 285223,
        cities: &[
            "Lucknow", "Kanpur", "Varanasi", "Agra", "Prayagraj", "Meerut", "Ghaziabad", "Noida",
            "Bareilly",
        ],
    },
    StateEntry {
        name: "Uttarakhand",
        min_code: 244712,
        max_code: 263680,
        cities: &[
            "Dehradun", "Haridwar", "Roorkee", "Haldwani", "Rudrapur", "Rishikesh", "Kashipur",
        ],
    },
    StateEntry {
        name: "West Bengal",
        min_code: 700001,
        max_code: 743711,
        cities: &[
            "Kolkata", "Howrah", "Durgapur", "Asansol", "Siliguri", "Bardhaman", "Malda",
            "Kharagpur",
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table_has_every_region() {
        let table = StateTable::load().unwrap();
        assert_eq!(table.len(), EXPECTED_STATES);
    }

    #[test]
    fn names_are_sorted() {
        let table = StateTable::load().unwrap();
        let names: Vec<_> = table.names().collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
        assert_eq!(names.first(), Some(&"Andaman and Nicobar Islands"));
        assert_eq!(names.last(), Some(&"West Bengal"));
    }

    #[test]
    fn unknown_state_collapses_to_zero_range() {
        let table = StateTable::load().unwrap();
        assert_eq!(table.postal_range("Atlantis"), (0, 0));
        assert_eq!(table.postal_range("West Bengal"), (700001, 743711));
        assert_eq!(table.postal_range("  West Bengal "), (700001, 743711));
    }

    #[test]
    fn short_table_is_rejected() {
        let err = StateTable::from_entries(&STATES[..34]).unwrap_err();
        assert_eq!(
            err,
            EngineError::InvalidStateTable("table has 34 entries, expected 35".to_string())
        );
    }

    #[test]
    fn duplicate_name_is_rejected() {
        let mut entries = STATES.to_vec();
        entries[1].name = entries[0].name;
        assert!(matches!(
            StateTable::from_entries(&entries),
            Err(EngineError::InvalidStateTable(_))
        ));
    }

    #[test]
    fn inverted_range_is_rejected() {
        let mut entries = STATES.to_vec();
        entries[0].min_code = entries[0].max_code + 1;
        assert!(StateTable::from_entries(&entries).is_err());
    }

    #[test]
    fn range_is_inclusive() {
        let table = StateTable::load().unwrap();
        let bengal = table.get("West Bengal").unwrap();
        assert!(bengal.accepts(700001));
        assert!(bengal.accepts(743711));
        assert!(!bengal.accepts(699999));
        assert!(!bengal.accepts(743712));
    }
}
