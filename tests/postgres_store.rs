//! `PgStore` against a live database. Ignored by default; run with
//! `DATABASE_URL=postgres://... cargo test -- --ignored`.

use cadastro_api::model::{NewCreditCard, NewUser, Page};
use cadastro_api::{ensure_database_exists, PgStore, Store, StoreError};
use chrono::NaiveDate;

async fn connect() -> Option<PgStore> {
    let url = std::env::var("DATABASE_URL").ok()?;
    ensure_database_exists(&url).await.unwrap();
    let store = PgStore::connect(&url, 2).await.unwrap();
    store.ensure_tables().await.unwrap();
    Some(store)
}

fn card() -> NewCreditCard {
    NewCreditCard {
        numero: "4000123456789010".into(),
        dt_expiracao: NaiveDate::from_ymd_opt(2027, 4, 11).unwrap(),
        cvv: "123".into(),
        saldo: 5000.0,
    }
}

#[tokio::test]
#[ignore]
async fn card_for_unknown_owner_is_rolled_back() {
    let Some(store) = connect().await else { return };

    let err = store.create_credit_card(-1, card()).await.unwrap_err();
    assert!(matches!(err, StoreError::MissingOwner), "got {err:?}");
    assert!(store.list_credit_cards(-1, Page::default()).await.unwrap().is_empty());
}

#[tokio::test]
#[ignore]
async fn user_with_card_is_referenced() {
    let Some(store) = connect().await else { return };
    let user = store
        .create_user(NewUser { nome: "Ana".into(), email: "ana@example.com".into() })
        .await
        .unwrap();
    let card = store.create_credit_card(user.id, card()).await.unwrap();

    let err = store.delete_user(user.id).await.unwrap_err();
    assert!(matches!(err, StoreError::Referenced), "got {err:?}");
    assert_eq!(store.get_credit_card(user.id, card.id).await.unwrap(), Some(card.clone()));

    assert!(store.delete_credit_card(user.id, card.id).await.unwrap());
    assert!(store.delete_user(user.id).await.unwrap());
    store.close().await;
}
