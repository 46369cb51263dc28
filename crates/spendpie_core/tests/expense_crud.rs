use spendpie_core::db::open_db_in_memory;
use spendpie_core::{
    ChangeKind, Expense, ExpenseId, ExpenseRepository, ExpenseService, ExpenseValidationError,
    RepoError, SqliteExpenseRepository,
};

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteExpenseRepository::try_new(&conn).unwrap();

    let expense = Expense::new("Coffee", 5.0).unwrap();
    let id = repo.create_expense(&expense).unwrap();

    let loaded = repo.get_expense(&id).unwrap().unwrap();
    assert_eq!(loaded, expense);
}

#[test]
fn list_keeps_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    let service = ExpenseService::new(SqliteExpenseRepository::try_new(&conn).unwrap());

    let names = ["Rent", "Coffee", "Books", "Bus"];
    for (index, name) in names.iter().enumerate() {
        service.create_expense(*name, index as f64 * 10.0).unwrap();
    }

    let listed: Vec<String> = service
        .list_expenses()
        .unwrap()
        .into_iter()
        .map(|expense| expense.name)
        .collect();
    assert_eq!(listed, names);
}

#[test]
fn update_missing_expense_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = ExpenseService::new(SqliteExpenseRepository::try_new(&conn).unwrap());

    let err = service
        .update_expense(&ExpenseId::new("missing"), "Tea", 3.0)
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id.as_str() == "missing"));
}

#[test]
fn service_rejects_invalid_cost_before_storage() {
    let conn = open_db_in_memory().unwrap();
    let service = ExpenseService::new(SqliteExpenseRepository::try_new(&conn).unwrap());

    let err = service.create_expense("Refund", -3.0).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ExpenseValidationError::InvalidCost(_))
    ));
    assert!(service.list_expenses().unwrap().is_empty());
    assert_eq!(service.repo().latest_change_seq().unwrap(), 0);
}

#[test]
fn every_mutation_appends_one_change_in_order() {
    let conn = open_db_in_memory().unwrap();
    let service = ExpenseService::new(SqliteExpenseRepository::try_new(&conn).unwrap());

    let id = service.create_expense("Coffee", 5.0).unwrap();
    service.update_expense(&id, "Coffee", 7.0).unwrap();
    service.delete_expense(&id).unwrap();

    let changes = service.repo().changes_since(0, None).unwrap();
    let kinds: Vec<ChangeKind> = changes.iter().map(|change| change.event.kind).collect();
    assert_eq!(
        kinds,
        vec![ChangeKind::Added, ChangeKind::Modified, ChangeKind::Removed]
    );
    assert!(changes.windows(2).all(|pair| pair[0].seq < pair[1].seq));
    assert_eq!(changes[1].event.expense.cost, 7.0);
    assert_eq!(changes[2].event.expense.id, id);
    assert_eq!(service.get_expense(&id).unwrap(), None);
}

#[test]
fn changes_since_respects_cursor_and_limit() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteExpenseRepository::try_new(&conn).unwrap();
    for cost in [1.0, 2.0, 3.0, 4.0] {
        repo.create_expense(&Expense::new("Snack", cost).unwrap())
            .unwrap();
    }

    let page = repo.changes_since(1, Some(2)).unwrap();
    let seqs: Vec<i64> = page.iter().map(|change| change.seq).collect();
    assert_eq!(seqs, vec![2, 3]);
    assert_eq!(repo.latest_change_seq().unwrap(), 4);
    assert!(repo.changes_since(4, None).unwrap().is_empty());
}
