use contacts_core::{
    canonical_contacts, Address, ContactRepository, ContactValidationError, MemoryContactRepository,
    NewAddress, NewContact, RepoError, SqliteContactRepository,
};
use std::collections::HashSet;

fn backends() -> Vec<(&'static str, Box<dyn ContactRepository>)> {
    let memory: Box<dyn ContactRepository> = Box::new(MemoryContactRepository::new());
    let sqlite: Box<dyn ContactRepository> =
        Box::new(SqliteContactRepository::open_in_memory().unwrap());
    vec![("memory", memory), ("sqlite", sqlite)]
}

fn batch_with_missing_city() -> Vec<NewContact> {
    let mut broken = NewContact::new("Broken").with_address("1 Good St", "Springfield");
    broken.addresses.push(NewAddress {
        street: Some("2 Bad St".to_string()),
        city: None,
    });
    vec![NewContact::new("Valid").with_address("3 Fine St", "Ogdenville"), broken]
}

#[test]
fn new_store_is_empty() {
    for (name, repo) in backends() {
        assert!(repo.is_empty().unwrap(), "{name}");
        assert!(repo.all_contacts().unwrap().is_empty(), "{name}");
    }
}

#[test]
fn insert_assigns_distinct_ids_and_keeps_address_counts() {
    let batch = canonical_contacts();
    for (name, mut repo) in backends() {
        let ids = repo.insert_contacts(&batch).unwrap();
        assert_eq!(ids.len(), batch.len(), "{name}");

        let contacts = repo.all_contacts().unwrap();
        assert_eq!(contacts.len(), batch.len(), "{name}");
        let distinct: HashSet<_> = contacts.iter().map(|c| c.id).collect();
        assert_eq!(distinct.len(), batch.len(), "{name}");

        for (contact, draft) in contacts.iter().zip(&batch) {
            assert_eq!(contact.name, draft.name, "{name}");
            assert_eq!(contact.addresses.len(), draft.addresses.len(), "{name}");
        }
        assert_eq!(contacts.iter().map(|c| c.id).collect::<Vec<_>>(), ids);
    }
}

#[test]
fn every_address_references_its_owning_contact() {
    for (name, mut repo) in backends() {
        repo.insert_contacts(&canonical_contacts()).unwrap();
        let contacts = repo.all_contacts().unwrap();
        let contact_ids: HashSet<_> = contacts.iter().map(|c| c.id).collect();

        for contact in &contacts {
            for address in &contact.addresses {
                assert_eq!(address.contact_id, contact.id, "{name}");
                assert!(contact_ids.contains(&address.contact_id), "{name}");
            }
        }
    }
}

#[test]
fn addresses_keep_insertion_order() {
    for (name, mut repo) in backends() {
        repo.insert_contacts(&canonical_contacts()).unwrap();
        let henry = repo
            .all_contacts()
            .unwrap()
            .into_iter()
            .find(|c| c.name == "Henry Brown")
            .unwrap();
        let streets: Vec<_> = henry.addresses.iter().map(|a| a.street.as_str()).collect();
        assert_eq!(
            streets,
            vec!["147 Poplar St", "258 Cherry Blvd", "369 Walnut Rd"],
            "{name}"
        );
    }
}

#[test]
fn ids_keep_growing_across_inserts() {
    for (name, mut repo) in backends() {
        let first = repo
            .insert_contacts(&[NewContact::new("a").with_address("1 A St", "X")])
            .unwrap();
        let second = repo
            .insert_contacts(&[NewContact::new("b").with_address("2 B St", "Y")])
            .unwrap();
        assert!(second[0] > first[0], "{name}");

        let contacts = repo.all_contacts().unwrap();
        assert!(contacts[1].addresses[0].id > contacts[0].addresses[0].id, "{name}");
    }
}

#[test]
fn inserting_twice_duplicates_data() {
    let batch = vec![NewContact::new("Twice").with_address("1 A St", "X")];
    for (name, mut repo) in backends() {
        repo.insert_contacts(&batch).unwrap();
        repo.insert_contacts(&batch).unwrap();
        let contacts = repo.all_contacts().unwrap();
        assert_eq!(contacts.len(), 2, "{name}");
        assert_ne!(contacts[0].id, contacts[1].id, "{name}");
    }
}

#[test]
fn missing_city_rejects_whole_batch() {
    for (name, mut repo) in backends() {
        let err = repo.insert_contacts(&batch_with_missing_city()).unwrap_err();
        assert!(
            matches!(
                err,
                RepoError::InvalidArgument(ContactValidationError::MissingCity {
                    contact_index: 1,
                    address_index: 1,
                })
            ),
            "{name}: unexpected error {err}"
        );
        assert!(repo.is_empty().unwrap(), "{name}");
        assert!(repo.all_contacts().unwrap().is_empty(), "{name}");
        assert!(repo.get_address(1).unwrap().is_none(), "{name}");
    }
}

#[test]
fn rejected_batch_leaves_existing_data_untouched() {
    for (name, mut repo) in backends() {
        repo.insert_contacts(&[NewContact::new("Kept").with_address("1 A St", "X")])
            .unwrap();
        repo.insert_contacts(&batch_with_missing_city()).unwrap_err();

        let contacts = repo.all_contacts().unwrap();
        assert_eq!(contacts.len(), 1, "{name}");
        assert_eq!(contacts[0].name, "Kept", "{name}");
    }
}

#[test]
fn contact_without_addresses_is_stored() {
    for (name, mut repo) in backends() {
        let ids = repo.insert_contacts(&[NewContact::new("Nobody")]).unwrap();
        let loaded = repo.get_contact(ids[0]).unwrap().unwrap();
        assert_eq!(loaded.name, "Nobody", "{name}");
        assert!(loaded.addresses.is_empty(), "{name}");
        assert!(!repo.is_empty().unwrap(), "{name}");
    }
}

#[test]
fn find_contacts_is_existential_over_addresses() {
    for (name, mut repo) in backends() {
        repo.insert_contacts(&canonical_contacts()).unwrap();
        let in_capital = repo
            .find_contacts(&|address: &Address| address.city == "Capital City")
            .unwrap();
        let names: Vec<_> = in_capital.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["David Martinez", "Grace Lee", "Iris Chen", "Kelly Anderson"],
            "{name}"
        );
        // Matching contacts still carry every address, not only the matching one.
        assert_eq!(in_capital[0].addresses.len(), 2, "{name}");
    }
}

#[test]
fn lookups_return_none_for_unknown_ids() {
    for (name, mut repo) in backends() {
        repo.insert_contacts(&canonical_contacts()).unwrap();
        assert!(repo.get_contact(999).unwrap().is_none(), "{name}");
        assert!(repo.get_address(999).unwrap().is_none(), "{name}");
    }
}

#[test]
fn contact_of_resolves_owner_through_foreign_key() {
    for (name, mut repo) in backends() {
        repo.insert_contacts(&canonical_contacts()).unwrap();
        let frank = repo
            .all_contacts()
            .unwrap()
            .into_iter()
            .find(|c| c.name == "Frank Wilson")
            .unwrap();
        let address = repo.get_address(frank.addresses[1].id).unwrap().unwrap();
        assert_eq!(address.street, "654 Spruce Way", "{name}");

        let owner = repo.contact_of(&address).unwrap().unwrap();
        assert_eq!(owner, frank, "{name}");
    }
}

#[test]
fn memory_iterator_reflects_live_state() {
    let mut repo = MemoryContactRepository::new();
    assert_eq!(repo.contacts().count(), 0);

    repo.insert_contacts(&canonical_contacts()).unwrap();
    let names: Vec<_> = repo.contacts().map(|c| c.name.clone()).collect();
    assert_eq!(names.len(), 13);
    assert_eq!(names.first().map(String::as_str), Some("Alice Smith"));
    assert_eq!(names.last().map(String::as_str), Some("Maya Patel"));
}
