//! Scripted sessions against the interactive shell.

use library_catalogue::{InMemoryModelStore, ItemKind, LibraryService, Shell};

use crate::support::{empty_memory_service, library};

fn run(service: &mut LibraryService<InMemoryModelStore>, script: &str) -> String {
    let mut output = Vec::new();
    Shell::new(service, script.as_bytes(), &mut output)
        .run()
        .unwrap();
    String::from_utf8(output).unwrap()
}

#[test]
fn register_borrow_and_search() {
    let mut service = empty_memory_service();
    let dune = service.add_item(ItemKind::Book, "Dune", "Herbert").unwrap();

    let transcript = run(&mut service, "3\nann@example.com\nAnn\n");
    assert!(transcript.contains("Ann you are now a member of the library."));
    let ann = service.catalogue().users()[0].clone();
    assert!(transcript.contains(&format!("Your ID is: {}", ann.display_id())));

    let script = format!(
        "4\n1\n{}\n{}\n2\n1\ndune\n1\n7\n",
        ann.display_id(),
        dune.display_id()
    );
    let transcript = run(&mut service, &script);

    assert!(transcript.contains("Ann borrowed Dune successfully."));
    assert!(transcript.contains("Status: not available, borrowed by Ann"));
    assert!(transcript.contains("There's no Book available!"));
    assert!(transcript.ends_with("Thanks for using the Library System.\n"));
    assert!(service.catalogue().users()[0].borrows(dune.id()));
}

#[test]
fn invalid_answers_are_asked_again() {
    let mut service = empty_memory_service();
    let transcript = run(&mut service, "abc\n9\n1\n7\n");

    assert!(transcript.contains("please enter a number"));
    assert!(transcript.contains("choice must be between 1 - 7"));
    assert!(transcript.contains("No items yet, the catalogue is empty."));
}

#[test]
fn unknown_user_aborts_the_action() {
    let mut lib = library();
    let transcript = run(&mut lib.service, "5\n1\nshort\n00000000\n7\n");

    assert!(transcript.contains("user id must be 8 characters"));
    assert!(transcript.contains("user 00000000 doesn't exist"));
    assert!(!transcript.contains("- the item id: "));
}

#[test]
fn reserve_and_cancel_from_the_menu() {
    let mut lib = library();
    let script = format!(
        "5\n1\n{user}\n{item}\n5\n2\n{user}\n{item}\n5\n1\n{user}\n{magazine}\n",
        user = lib.bob.display_id(),
        item = lib.alien.display_id(),
        magazine = lib.wired.display_id(),
    );
    let transcript = run(&mut lib.service, &script);

    assert!(transcript.contains("Bob reserved Alien."));
    assert!(transcript.contains("Bob cancelled the reservation of Alien."));
    assert!(transcript.contains("you can't reserve a Magazine"));
    assert!(lib.service.catalogue().item(lib.alien.id()).unwrap().check_availability());
}

#[test]
fn wrong_admin_secret_can_back_out() {
    let mut lib = library();
    let transcript = run(&mut lib.service, "6\n\n1234\n-1\n7\n");

    assert!(transcript.contains("you can't leave the password empty"));
    assert!(transcript.contains("Please input the correct password."));
    assert!(!transcript.contains("Manage library items"));
    assert!(transcript.ends_with("Thanks for using the Library System.\n"));
}

#[test]
fn admin_adds_and_removes_items() {
    let mut service = empty_memory_service();
    let transcript = run(
        &mut service,
        "6\n12345\n1\n1\ndvd\nAlien\nScott\n6\n12345\n1\n1\nDVD\nalien\nscott\n",
    );

    assert!(transcript.contains("Alien added successfully with ID"));
    assert!(transcript.contains("DVD \"alien\" by scott already exists"));
    assert_eq!(service.catalogue().items().len(), 1);

    let transcript = run(&mut service, "6\n12345\n1\n2\nvinyl\ndvd\nAlien\nScott\n");
    assert!(transcript.contains("invalid item type"));
    assert!(transcript.contains("Alien removed successfully."));
    assert!(service.catalogue().items().is_empty());
}

#[test]
fn admin_refuses_to_remove_a_borrower() {
    let mut lib = library();
    lib.service.borrow(lib.ann.id(), lib.dune.id()).unwrap();

    let script = format!("6\n12345\n2\n2\n{}\n", lib.ann.display_id());
    let transcript = run(&mut lib.service, &script);

    assert!(transcript.contains("cannot remove user Ann: they have 1 borrowed item(s)"));
    assert_eq!(lib.service.catalogue().users().len(), 2);
}

#[test]
fn end_of_input_ends_the_session() {
    let mut service = empty_memory_service();
    let transcript = run(&mut service, "3\nann@example.com\n");
    assert!(transcript.ends_with("- Your name: "));
    assert!(service.catalogue().users().is_empty());
}
