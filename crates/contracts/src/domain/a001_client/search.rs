use super::aggregate::Client;
use crate::domain::a002_person::aggregate::Person;
use serde::{Deserialize, Serialize};

/// Which field the dashboard search query is matched against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ClientFilter {
    /// Denomination, client number or member names
    #[default]
    All,
    Denomination,
    Members,
    Number,
}

/// Dashboard search parameters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientSearch {
    #[serde(default, rename = "q")]
    pub query: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub filter: ClientFilter,
}

impl ClientSearch {
    /// `members` are the people attached to `client`
    pub fn matches(&self, client: &Client, members: &[&Person]) -> bool {
        let city_query = self.city.trim().to_lowercase();
        if !city_query.is_empty() && !client.city().to_lowercase().contains(&city_query) {
            return false;
        }

        let query = self.query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }

        let member_matches =
            || members.iter().any(|m| m.full_name().to_lowercase().contains(&query));

        match self.filter {
            ClientFilter::Denomination => client.denomination().to_lowercase().contains(&query),
            ClientFilter::Members => member_matches(),
            ClientFilter::Number => client.client_number().to_lowercase().contains(&query),
            ClientFilter::All => {
                client.denomination().to_lowercase().contains(&query)
                    || client.client_number().to_lowercase().contains(&query)
                    || member_matches()
            }
        }
    }

    /// Filters `clients`, keeping the input order. Soft-deleted records are skipped.
    pub fn apply<'a>(&self, clients: &'a [Client], people: &[Person]) -> Vec<&'a Client> {
        clients
            .iter()
            .filter(|client| !client.base.metadata.is_deleted)
            .filter(|client| {
                let members: Vec<&Person> = people
                    .iter()
                    .filter(|p| p.client_id == client.base.id && !p.base.metadata.is_deleted)
                    .collect();
                self.matches(client, &members)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_client::aggregate::tests::sample_client;
    use crate::domain::a002_person::aggregate::tests::sample_person;

    fn search(query: &str, city: &str, filter: ClientFilter) -> ClientSearch {
        ClientSearch {
            query: query.into(),
            city: city.into(),
            filter,
        }
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let client = sample_client();
        assert!(ClientSearch::default().matches(&client, &[]));
    }

    #[test]
    fn test_filters_by_field() {
        let client = sample_client();
        let person = sample_person(client.base.id);
        let members = vec![&person];

        assert!(search("techno", "", ClientFilter::Denomination).matches(&client, &members));
        assert!(!search("techno", "", ClientFilter::Number).matches(&client, &members));
        assert!(search("2024-001", "", ClientFilter::Number).matches(&client, &members));
        assert!(search("jean dup", "", ClientFilter::Members).matches(&client, &members));
        assert!(!search("jean dup", "", ClientFilter::Denomination).matches(&client, &members));
        assert!(search("JEAN", "", ClientFilter::All).matches(&client, &members));
    }

    #[test]
    fn test_city_is_an_and_condition() {
        let client = sample_client();
        assert!(search("", "paris", ClientFilter::All).matches(&client, &[]));
        assert!(!search("", "lyon", ClientFilter::All).matches(&client, &[]));
        assert!(!search("techno", "lyon", ClientFilter::All).matches(&client, &[]));
    }

    #[test]
    fn test_apply_only_uses_own_members() {
        let client = sample_client();
        let other = sample_client();
        let person = sample_person(other.base.id);
        let clients = vec![client.clone(), other.clone()];
        let people = vec![person];

        let found = search("dupont", "", ClientFilter::Members).apply(&clients, &people);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].base.id, other.base.id);
    }
}
