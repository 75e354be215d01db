use std::str::FromStr;

use roommate_ledger::db::Database;
use roommate_ledger::ledger::{allocator, chores, roster};
use roommate_ledger::models::*;
use rust_decimal::Decimal;
use speculate2::speculate;
use uuid::Uuid;

fn create_test_roommate(db: &Database, name: &str) -> Roommate {
    let roommate = roster::new_roommate(CreateRoommateInput {
        name: name.to_string(),
        email: None,
    })
    .expect("Failed to build roommate");
    db.insert_roommate(&roommate).expect("Failed to insert roommate");
    roommate
}

fn create_test_bill(db: &Database, description: &str, amount: &str, due: &str) -> Bill {
    let roster = db.get_all_roommates().expect("Failed to load roster");
    let bill = allocator::create_bill(
        CreateBillInput {
            description: description.to_string(),
            amount: Some(money(amount)),
            due_date: due.to_string(),
            ..Default::default()
        },
        &roster,
    )
    .expect("Failed to allocate bill");
    db.insert_bill(&bill).expect("Failed to insert bill");
    bill
}

fn create_test_chore(db: &Database, name: &str, assigned_to: Vec<Uuid>) -> Chore {
    let roster = db.get_all_roommates().expect("Failed to load roster");
    let chore = chores::new_chore(
        CreateChoreInput {
            name: name.to_string(),
            assigned_to,
            due_date: "2025-11-20".to_string(),
        },
        &roster,
    )
    .expect("Failed to build chore");
    db.insert_chore(&chore).expect("Failed to insert chore");
    chore
}

fn money(s: &str) -> Decimal {
    Decimal::from_str(s).expect("valid decimal")
}

speculate! {
    before {
        let db = Database::open_memory().expect("Failed to create in-memory database");
        db.migrate().expect("Failed to run migrations");
    }

    describe "roommates" {
        it "lists roommates in insertion order" {
            create_test_roommate(&db, "Zoe");
            create_test_roommate(&db, "Adam");
            create_test_roommate(&db, "Mia");

            let names: Vec<_> = db
                .get_all_roommates()
                .expect("Query failed")
                .into_iter()
                .map(|r| r.name)
                .collect();
            assert_eq!(names, vec!["Zoe", "Adam", "Mia"]);
        }

        it "round-trips a roommate exactly" {
            let created = create_test_roommate(&db, "Alex");

            let found = db.get_roommate(created.id).expect("Query failed");
            assert_eq!(found, Some(created));
        }

        it "returns None for non-existent roommate" {
            let result = db.get_roommate(Uuid::new_v4()).expect("Query failed");
            assert!(result.is_none());
        }
    }

    describe "bills" {
        describe "insert_bill" {
            it "stores the bill with its splits" {
                create_test_roommate(&db, "Alice");
                create_test_roommate(&db, "Bob");
                create_test_roommate(&db, "Carol");
                let bill = create_test_bill(&db, "Electric", "90.00", "2025-12-01");

                let found = db.get_bill(bill.id).expect("Query failed").expect("Bill missing");
                assert_eq!(found, bill);
                assert_eq!(found.splits.len(), 3);
                assert!(found.splits.iter().all(|s| s.owed_amount == money("30.00")));
            }

            it "keeps the amount scale through storage" {
                create_test_roommate(&db, "Alice");
                let bill = create_test_bill(&db, "Water", "40", "2025-12-01");

                let found = db.get_bill(bill.id).expect("Query failed").expect("Bill missing");
                assert_eq!(found.amount.to_string(), "40.00");
                assert_eq!(found.splits[0].owed_amount.to_string(), "40.00");
            }

            it "stores a bill without splits" {
                let bill = create_test_bill(&db, "Rent", "1200", "2025-12-01");

                let found = db.get_bill(bill.id).expect("Query failed").expect("Bill missing");
                assert!(found.splits.is_empty());
            }
        }

        describe "get_all_bills" {
            it "groups splits under their bills" {
                create_test_roommate(&db, "Alice");
                create_test_roommate(&db, "Bob");
                let internet = create_test_bill(&db, "Internet", "100", "2025-12-02");
                let gas = create_test_bill(&db, "Gas", "10", "2025-12-01");

                let bills = db.get_all_bills().expect("Query failed");

                assert_eq!(bills.len(), 2);
                assert_eq!(bills[0].id, gas.id);
                assert_eq!(bills[1].id, internet.id);
                assert_eq!(bills[0].splits, gas.splits);
                assert_eq!(bills[1].splits, internet.splits);
            }

            it "returns an empty list when there are no bills" {
                let bills = db.get_all_bills().expect("Query failed");
                assert!(bills.is_empty());
            }
        }

        it "returns None for non-existent bill" {
            let result = db.get_bill(Uuid::new_v4()).expect("Query failed");
            assert!(result.is_none());
        }
    }

    describe "chores" {
        it "stores assignees in order" {
            let alex = create_test_roommate(&db, "Alex");
            let blake = create_test_roommate(&db, "Blake");
            let chore = create_test_chore(&db, "Dishes", vec![blake.id, alex.id]);

            let found = db.get_chore(chore.id).expect("Query failed").expect("Chore missing");
            assert_eq!(found.assigned_to, vec![blake.id, alex.id]);
            assert!(!found.completed);
        }

        it "lists chores with their assignees" {
            let alex = create_test_roommate(&db, "Alex");
            create_test_chore(&db, "Dishes", vec![alex.id]);
            create_test_chore(&db, "Trash", vec![]);

            let chores = db.get_all_chores().expect("Query failed");
            assert_eq!(chores.len(), 2);
            let dishes = chores.iter().find(|c| c.name == "Dishes").expect("Dishes missing");
            let trash = chores.iter().find(|c| c.name == "Trash").expect("Trash missing");
            assert_eq!(dishes.assigned_to, vec![alex.id]);
            assert!(trash.assigned_to.is_empty());
        }

        describe "complete_chore" {
            it "marks the chore completed" {
                let chore = create_test_chore(&db, "Vacuum", vec![]);

                let done = db.complete_chore(chore.id).expect("Update failed").expect("Chore missing");
                assert!(done.completed);

                let again = db.complete_chore(chore.id).expect("Update failed").expect("Chore missing");
                assert!(again.completed);
            }

            it "returns the completed chore with its assignees" {
                let alex = create_test_roommate(&db, "Alex");
                let blake = create_test_roommate(&db, "Blake");
                let chore = create_test_chore(&db, "Laundry", vec![alex.id, blake.id]);

                let done = db.complete_chore(chore.id).expect("Update failed").expect("Chore missing");

                assert_eq!(done.id, chore.id);
                assert_eq!(done.assigned_to, vec![alex.id, blake.id]);
                assert_eq!(done.created_at, chore.created_at);
                assert_eq!(db.get_chore(chore.id).expect("Query failed"), Some(done));
            }

            it "survives concurrent clears" {
                for _ in 0..50 {
                    let chore = create_test_chore(&db, "Sweep", vec![]);
                    let clearer = db.clone();
                    let handle = std::thread::spawn(move || clearer.clear_all().expect("Clear failed"));

                    if let Some(done) = db.complete_chore(chore.id).expect("Update failed") {
                        assert!(done.completed);
                        assert_eq!(done.id, chore.id);
                    }
                    handle.join().expect("Clear thread panicked");
                }
            }

            it "returns None for non-existent chore" {
                let result = db.complete_chore(Uuid::new_v4()).expect("Update failed");
                assert!(result.is_none());
            }
        }
    }

    describe "clear_all" {
        it "removes every record and reports counts" {
            let alex = create_test_roommate(&db, "Alex");
            create_test_roommate(&db, "Blake");
            create_test_bill(&db, "Electric", "90", "2025-12-01");
            create_test_chore(&db, "Dishes", vec![alex.id]);

            let report = db.clear_all().expect("Clear failed");

            assert_eq!(report.roommates, 2);
            assert_eq!(report.bills, 1);
            assert_eq!(report.chores, 1);
            assert!(db.get_all_roommates().expect("Query failed").is_empty());
            assert!(db.get_all_bills().expect("Query failed").is_empty());
            assert!(db.get_all_chores().expect("Query failed").is_empty());
        }

        it "reports zero on an empty database" {
            let report = db.clear_all().expect("Clear failed");
            assert_eq!(report, ClearReport::default());
        }
    }

    describe "on-disk database" {
        it "persists across reopen" {
            let dir = tempfile::tempdir().expect("Failed to create temp dir");
            let path = dir.path().join("nested").join("ledger.db");

            let roommate = {
                let disk = Database::open(path.clone()).expect("Failed to open");
                disk.migrate().expect("Failed to migrate");
                create_test_roommate(&disk, "Alex")
            };

            let reopened = Database::open(path).expect("Failed to reopen");
            reopened.migrate().expect("Failed to migrate twice");
            let roster = reopened.get_all_roommates().expect("Query failed");
            assert_eq!(roster, vec![roommate]);
        }
    }
}
