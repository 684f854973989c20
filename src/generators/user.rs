//! The fixed application user roster.

use uuid::Uuid;

/// Generated user row ready for database insertion.
#[derive(Debug, Clone)]
pub struct GeneratedUser {
    pub id: Uuid,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub is_admin: bool,
}

/// Standard users beyond the administrator: (email, first name, last name).
const STANDARD_USERS: &[(&str, &str, &str)] = &[
    ("benutzer@gfu-krankmeldung.de", "Standard", "Benutzer"),
    ("maria.mueller@gfu-krankmeldung.de", "Maria", "Müller"),
    ("thomas.schmidt@gfu-krankmeldung.de", "Thomas", "Schmidt"),
    ("anna.wagner@gfu-krankmeldung.de", "Anna", "Wagner"),
    ("michael.becker@gfu-krankmeldung.de", "Michael", "Becker"),
    ("julia.schneider@gfu-krankmeldung.de", "Julia", "Schneider"),
];

/// Produces the fixed roster: one administrator plus the standard users.
/// Emails are unique by construction. Passwords are opaque placeholder
/// strings for the seed dataset, not real credentials.
pub struct UserGenerator;

impl UserGenerator {
    pub fn generate_roster() -> Vec<GeneratedUser> {
        let mut users = vec![GeneratedUser {
            id: Uuid::new_v4(),
            email: "admin@gfu-krankmeldung.de".to_string(),
            password: "admin123".to_string(),
            first_name: "Admin".to_string(),
            last_name: "Benutzer".to_string(),
            is_admin: true,
        }];

        for (email, first_name, last_name) in STANDARD_USERS {
            users.push(GeneratedUser {
                id: Uuid::new_v4(),
                email: email.to_string(),
                password: "password123".to_string(),
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
                is_admin: false,
            });
        }

        users
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_size() {
        assert_eq!(UserGenerator::generate_roster().len(), 7);
    }

    #[test]
    fn test_exactly_one_admin() {
        let admins = UserGenerator::generate_roster()
            .iter()
            .filter(|u| u.is_admin)
            .count();
        assert_eq!(admins, 1);
    }

    #[test]
    fn test_emails_unique() {
        let users = UserGenerator::generate_roster();
        let emails: std::collections::HashSet<_> = users.iter().map(|u| u.email.as_str()).collect();
        assert_eq!(emails.len(), users.len());
    }

    #[test]
    fn test_ids_unique_across_rosters() {
        let a = UserGenerator::generate_roster();
        let b = UserGenerator::generate_roster();
        let ids: std::collections::HashSet<_> =
            a.iter().chain(b.iter()).map(|u| u.id).collect();
        assert_eq!(ids.len(), a.len() + b.len());
    }
}
