//! Tests for ownership and visibility rules

#[cfg(test)]
mod tests {
    use rollpage::RollpageError;
    use rollpage::model::page::Page;
    use rollpage::model::table::RollTable;
    use rollpage::store::access::{
        AuthContext, CallerContext, delete_as, ensure_owner, ensure_visible, load_visible, save_as,
    };
    use rollpage::store::{MemoryStorage, RecordKind, Storage};

    fn private_page(owner: &str) -> Page {
        let mut page = Page::new("Lair", "lair", owner);
        page.is_public = false;
        page
    }

    #[test]
    fn test_caller_context() {
        assert_eq!(CallerContext::anonymous().caller_id(), None);
        assert_eq!(CallerContext::user("alice").caller_id(), Some("alice"));
        assert!(CallerContext::user("alice").is_owner(&Page::new("Camp", "camp", "alice")));
    }

    // Anonymous callers must log in, other users are denied
    #[test]
    fn test_ensure_owner() {
        let page = Page::new("Camp", "camp", "alice");

        assert!(ensure_owner(&CallerContext::user("alice"), &page).is_ok());
        assert!(matches!(
            ensure_owner(&CallerContext::anonymous(), &page),
            Err(RollpageError::Unauthenticated)
        ));
        assert!(matches!(
            ensure_owner(&CallerContext::user("bob"), &page),
            Err(RollpageError::PermissionDenied { kind: RecordKind::Page, .. })
        ));
    }

    // Private pages look missing to everyone but their owner
    // Verified by returning PermissionDenied for hidden pages
    #[test]
    fn test_private_page_visibility() {
        let page = private_page("alice");

        assert!(ensure_visible(&CallerContext::user("alice"), &page).is_ok());
        assert!(matches!(
            ensure_visible(&CallerContext::user("bob"), &page),
            Err(RollpageError::NotFound { .. })
        ));
        assert!(matches!(
            ensure_visible(&CallerContext::anonymous(), &page),
            Err(RollpageError::NotFound { .. })
        ));
    }

    #[test]
    fn test_public_page_visibility() {
        let page = Page::new("Camp", "camp", "alice");
        assert!(ensure_visible(&CallerContext::anonymous(), &page).is_ok());
    }

    // Tables are visible to their owner only
    #[test]
    fn test_table_visibility() {
        let table = RollTable::new("Loot", "alice");

        assert!(ensure_visible(&CallerContext::user("alice"), &table).is_ok());
        assert!(ensure_visible(&CallerContext::user("bob"), &table).is_err());
    }

    #[test]
    fn test_load_visible() {
        let mut storage = MemoryStorage::new();
        let page = private_page("alice");
        let id = page.id;
        assert!(storage.save(page.into()).is_ok());

        assert!(load_visible(&storage, &CallerContext::user("alice"), RecordKind::Page, id).is_ok());
        assert!(matches!(
            load_visible(&storage, &CallerContext::user("bob"), RecordKind::Page, id),
            Err(RollpageError::NotFound { .. })
        ));
    }

    // Records are created in the caller's name and updated only by their owner
    #[test]
    fn test_save_as() {
        let mut storage = MemoryStorage::new();
        let alice = CallerContext::user("alice");
        let bob = CallerContext::user("bob");
        let mut page = Page::new("Camp", "camp", "alice");

        assert!(matches!(
            save_as(&mut storage, &bob, page.clone().into()),
            Err(RollpageError::PermissionDenied { .. })
        ));
        assert!(save_as(&mut storage, &alice, page.clone().into()).is_ok());

        page.name = "Camp at night".to_string();
        assert!(save_as(&mut storage, &bob, page.clone().into()).is_err());
        assert!(save_as(&mut storage, &alice, page.clone().into()).is_ok());

        assert_eq!(
            storage.load_page(page.id).map(|stored| stored.name).ok(),
            Some("Camp at night".to_string())
        );
    }

    // Ownership cannot be handed over through an update
    #[test]
    fn test_ownership_transfer_rejected() {
        let mut storage = MemoryStorage::new();
        let alice = CallerContext::user("alice");
        let mut table = RollTable::new("Loot", "alice");
        assert!(save_as(&mut storage, &alice, table.clone().into()).is_ok());

        table.owner = "bob".to_string();

        assert!(matches!(
            save_as(&mut storage, &alice, table.into()),
            Err(RollpageError::PermissionDenied { .. })
        ));
    }

    #[test]
    fn test_delete_as() {
        let mut storage = MemoryStorage::new();
        let table = RollTable::new("Loot", "alice");
        let id = table.id;
        assert!(storage.save(table.into()).is_ok());

        assert!(matches!(
            delete_as(&mut storage, &CallerContext::anonymous(), RecordKind::Table, id),
            Err(RollpageError::Unauthenticated)
        ));
        assert!(delete_as(&mut storage, &CallerContext::user("bob"), RecordKind::Table, id).is_err());
        assert!(delete_as(&mut storage, &CallerContext::user("alice"), RecordKind::Table, id).is_ok());
        assert!(storage.load_table(id).is_err());
    }
}
