mod support;

use library_frontend::utils::validation::Field;
use library_frontend::{Action, CatalogError, HttpCatalog, Origin, Store, SyncPolicy};
use support::{book, spawn_backend};

fn quantity_of(store: &Store<HttpCatalog>, isbn: &str) -> Option<i64> {
    store
        .state()
        .books
        .iter()
        .find(|b| b.isbn == isbn)
        .map(|b| b.quantity)
}

#[tokio::test]
async fn add_borrow_remove_dune() {
    let (base_url, shelf) = spawn_backend(Vec::new()).await;
    let mut store = Store::with_defaults(HttpCatalog::new(&base_url).unwrap());
    store.mount().await;
    assert!(store.state().books.is_empty());
    assert_eq!(store.state().total, Some(0));

    let form = store.form_mut();
    form.set(Field::Title, "Dune");
    form.set(Field::Author, "Herbert");
    form.set(Field::Isbn, "123456789");
    form.set(Field::Quantity, "3");
    store.dispatch(Action::SubmitAdd).await.unwrap();
    assert_eq!(quantity_of(&store, "123456789"), Some(3));
    assert_eq!(store.state().total, Some(1));
    assert_eq!(store.state().add.value(Field::Title), "");

    store
        .dispatch(Action::Borrow {
            isbn: "123456789".to_string(),
            origin: Origin::List,
        })
        .await
        .unwrap();
    assert_eq!(quantity_of(&store, "123456789"), Some(2));

    store
        .dispatch(Action::Remove("123456789".to_string()))
        .await
        .unwrap();
    assert_eq!(quantity_of(&store, "123456789"), None);
    assert!(shelf.lock().unwrap().is_empty());
}

#[tokio::test]
async fn borrowing_past_zero_is_refused() {
    let (base_url, _shelf) = spawn_backend(vec![book("Emma", "Austen", "987654321", 1)]).await;
    let mut store = Store::with_defaults(HttpCatalog::new(&base_url).unwrap());
    store.mount().await;

    let borrow = || Action::Borrow {
        isbn: "987654321".to_string(),
        origin: Origin::List,
    };
    store.dispatch(borrow()).await.unwrap();
    assert_eq!(quantity_of(&store, "987654321"), Some(0));

    let err = store.dispatch(borrow()).await.unwrap_err();
    assert!(matches!(err, CatalogError::NotAvailable(_)));
    assert_eq!(quantity_of(&store, "987654321"), Some(0));
}

#[tokio::test]
async fn search_then_borrow_refreshes_results() {
    let (base_url, _shelf) = spawn_backend(vec![
        book("Dune", "Herbert", "123456789", 3),
        book("Emma", "Austen", "987654321", 1),
    ])
    .await;
    let mut store = Store::with_defaults(HttpCatalog::new(&base_url).unwrap());
    store.mount().await;

    store
        .dispatch(Action::Search("Herbert".to_string()))
        .await
        .unwrap();
    assert_eq!(store.state().books.len(), 1);

    store
        .dispatch(Action::Borrow {
            isbn: "123456789".to_string(),
            origin: Origin::Search,
        })
        .await
        .unwrap();
    let results = store.state().search.results().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].quantity, 2);
    assert_eq!(store.state().total, Some(2));
}

#[tokio::test]
async fn optimistic_return_matches_server() {
    let (base_url, shelf) = spawn_backend(vec![book("Dune", "Herbert", "123456789", 3)]).await;
    let mut store = Store::new(HttpCatalog::new(&base_url).unwrap(), 6, SyncPolicy::Optimistic);
    store.mount().await;

    store
        .dispatch(Action::Return("123456789".to_string()))
        .await
        .unwrap();
    assert_eq!(quantity_of(&store, "123456789"), Some(4));
    assert_eq!(shelf.lock().unwrap()[0].quantity, 4);

    let err = store
        .dispatch(Action::Return("000000000".to_string()))
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::NotFound(_)));
    assert_eq!(quantity_of(&store, "123456789"), Some(4));
}
