//! Employee generation, partitioned across departments.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generated employee row ready for database insertion.
#[derive(Debug, Clone)]
pub struct GeneratedEmployee {
    pub id: Uuid,
    pub personnel_number: String,
    pub first_name: String,
    pub last_name: String,
    pub position: String,
    /// Department the employee was drawn for. Not a table column; kept so
    /// callers can verify the position against the department's taxonomy.
    pub department: &'static str,
}

/// A department and its position taxonomy.
#[derive(Debug, Clone, Copy)]
pub struct Department {
    pub name: &'static str,
    pub positions: &'static [&'static str],
}

/// The fixed set of departments employees are partitioned across.
pub const DEPARTMENTS: &[Department] = &[
    Department {
        name: "IT",
        positions: &[
            "Entwickler",
            "System-Administrator",
            "IT-Support",
            "DevOps Engineer",
            "Datenbankadministrator",
            "Netzwerktechniker",
        ],
    },
    Department {
        name: "Vertrieb",
        positions: &[
            "Vertriebsmitarbeiter",
            "Account Manager",
            "Sales Manager",
            "Vertriebsleiter",
            "Key Account Manager",
        ],
    },
    Department {
        name: "Marketing",
        positions: &[
            "Marketing-Assistent",
            "Social Media Manager",
            "Content Creator",
            "Marketing-Analyst",
            "Brand Manager",
        ],
    },
    Department {
        name: "Personal",
        positions: &[
            "HR-Mitarbeiter",
            "Personalreferent",
            "Recruiting Manager",
            "Personalentwickler",
            "Ausbildungsbeauftragter",
        ],
    },
    Department {
        name: "Finanzen",
        positions: &[
            "Buchhalter",
            "Controller",
            "Finanzanalyst",
            "Kreditsachbearbeiter",
            "Steuerreferent",
        ],
    },
    Department {
        name: "Produktion",
        positions: &[
            "Produktionsmitarbeiter",
            "Schichtleiter",
            "Qualitätsprüfer",
            "Produktionsplaner",
            "Logistikmitarbeiter",
        ],
    },
    Department {
        name: "Forschung",
        positions: &[
            "Forscher",
            "Laborant",
            "Produktentwickler",
            "R&D Spezialist",
            "Innovationsmanager",
        ],
    },
    Department {
        name: "Kundendienst",
        positions: &[
            "Kundenberater",
            "Service-Mitarbeiter",
            "Helpdesk-Mitarbeiter",
            "Kundenbetreuer",
            "Call-Center-Agent",
        ],
    },
];

const FIRST_NAMES: &[&str] = &[
    "Alexander", "Birgit", "Christian", "Dana", "Erik", "Franziska", "Gerhard", "Heike", "Ingo",
    "Jasmin", "Karsten", "Laura", "Markus", "Nina", "Oliver", "Petra", "Quentin", "Rebecca",
    "Stefan", "Tanja", "Uwe", "Vera", "Wolfgang", "Xenia", "Yannick", "Zoe",
];

const LAST_NAMES: &[&str] = &[
    "Müller", "Schmidt", "Schneider", "Fischer", "Weber", "Meyer", "Wagner", "Becker", "Schulz",
    "Hoffmann", "Schäfer", "Koch", "Bauer", "Richter", "Klein", "Wolf", "Schröder", "Neumann",
    "Schwarz", "Zimmermann", "Braun", "Krüger", "Hofmann", "Hartmann", "Lange", "Schmitt",
    "Werner", "Schmitz", "Krause", "Meier",
];

/// Configuration for employee generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeGenConfig {
    /// Inclusive range of employees per department.
    pub per_department: (usize, usize),
    /// Prefix for personnel numbers.
    pub personnel_prefix: String,
    /// Numbering starts at `personnel_base + 1`.
    pub personnel_base: u32,
}

impl Default for EmployeeGenConfig {
    fn default() -> Self {
        Self {
            per_department: (3, 5),
            personnel_prefix: "P".to_string(),
            personnel_base: 1000,
        }
    }
}

/// Generates the employee roster.
pub struct EmployeeGenerator {
    config: EmployeeGenConfig,
}

impl EmployeeGenerator {
    pub fn new() -> Self {
        Self {
            config: EmployeeGenConfig::default(),
        }
    }

    pub fn with_config(config: EmployeeGenConfig) -> Self {
        Self { config }
    }

    /// Generates 3-5 employees per department (with default config).
    ///
    /// Personnel numbers form a monotonically increasing sequence, so they
    /// are unique without any coordination. Positions are drawn from the
    /// employee's own department taxonomy.
    pub fn generate_roster(&self, rng: &mut impl Rng) -> Vec<GeneratedEmployee> {
        let (min, max) = self.config.per_department;
        let mut personnel_nr = self.config.personnel_base;
        let mut employees = Vec::new();

        for department in DEPARTMENTS {
            let count = rng.gen_range(min..=max);
            for _ in 0..count {
                personnel_nr += 1;
                employees.push(GeneratedEmployee {
                    id: Uuid::new_v4(),
                    personnel_number: format!("{}{personnel_nr}", self.config.personnel_prefix),
                    first_name: pick(FIRST_NAMES, rng),
                    last_name: pick(LAST_NAMES, rng),
                    position: pick(department.positions, rng),
                    department: department.name,
                });
            }
        }

        employees
    }
}

impl Default for EmployeeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn pick(pool: &[&str], rng: &mut impl Rng) -> String {
    pool.choose(rng).map(|s| s.to_string()).unwrap_or_default()
}
