//! Tests for CatalogService use cases

use std::io;
use std::sync::{Arc, Mutex};

use rstest::{fixture, rstest};

use taxtree::application::{ApplicationError, CatalogService};
use taxtree::domain::{DomainError, Rank, SpeciesStatus, Traversal};
use taxtree::infrastructure::traits::{CommandRunner, LinkOpener, SystemLinkOpener};
use taxtree::util::testing;

#[derive(Default)]
struct RecordingOpener {
    opened: Mutex<Vec<String>>,
}

impl LinkOpener for RecordingOpener {
    fn open(&self, url: &str) -> io::Result<()> {
        self.opened.lock().unwrap().push(url.to_string());
        Ok(())
    }
}

struct FailingRunner;

impl CommandRunner for FailingRunner {
    fn spawn(&self, cmd: &str, _args: &[&str]) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::NotFound, format!("{cmd} not installed")))
    }
}

#[fixture]
fn opener() -> Arc<RecordingOpener> {
    Arc::new(RecordingOpener::default())
}

#[fixture]
fn catalog(opener: Arc<RecordingOpener>) -> CatalogService {
    testing::init_test_setup();
    let mut catalog = CatalogService::new(opener);
    catalog.seed_examples();
    catalog
}

const MAKO: [&str; 5] = ["Chondrichthyes", "Lamniformes", "Lamnidae", "Isurus", "oxyrinchus"];

#[rstest]
fn given_seeded_catalog_when_adding_sibling_family_member_then_only_new_ranks_created(
    mut catalog: CatalogService,
) {
    let report = catalog
        .add_species(&MAKO, "Shortfin Mako", "https://en.wikipedia.org/wiki/Shortfin_mako_shark")
        .unwrap();

    assert_eq!(report.species_status, SpeciesStatus::Added);
    assert_eq!(
        report.created,
        vec![(Rank::Genus, "Isurus".to_string()), (Rank::Species, "oxyrinchus".to_string())]
    );
    let lamnidae = catalog.lookup("lamnidae").unwrap().unwrap();
    assert_eq!(lamnidae.children, 2);
}

#[rstest]
fn given_identical_details_when_adding_again_then_unchanged(mut catalog: CatalogService) {
    let report = catalog
        .add_species(
            &["Chondrichthyes", "Carcharhiniformes", "Carcharhinidae", "Galeocerdo", "cuvier"],
            "Tiger Shark",
            "https://en.wikipedia.org/wiki/Tiger_shark",
        )
        .unwrap();
    assert_eq!(report.species_status, SpeciesStatus::Unchanged);
    assert!(report.created.is_empty());
}

#[rstest]
fn given_other_class_when_adding_then_conflict_reported(mut catalog: CatalogService) {
    let before = catalog.tree().len();
    let err = catalog
        .add_species(&["Mammalia", "Carnivora", "Felidae", "Panthera", "leo"], "Lion", "")
        .unwrap_err();
    assert!(matches!(err, ApplicationError::Domain(DomainError::Conflict { .. })));
    assert_eq!(catalog.tree().len(), before);
}

#[rstest]
#[case("Carcharhinidae", Rank::Family)]
#[case("GALEOCERDO", Rank::Genus)]
#[case("great white shark", Rank::Species)]
fn given_name_in_any_case_when_looking_up_then_found_with_rank(
    catalog: CatalogService,
    #[case] query: &str,
    #[case] rank: Rank,
) {
    let summary = catalog.lookup(query).unwrap().expect("found");
    assert_eq!(summary.rank, rank);
}

#[rstest]
fn given_blank_query_when_looking_up_then_validation_error(catalog: CatalogService) {
    let err = catalog.lookup("   ").unwrap_err();
    assert!(matches!(err, ApplicationError::Domain(DomainError::Validation(_))));
}

#[rstest]
fn given_higher_rank_when_looking_up_then_no_common_name(catalog: CatalogService) {
    let summary = catalog.lookup("Lamniformes").unwrap().unwrap();
    assert_eq!(summary.common_name, None);
    assert_eq!(summary.reference_link, None);
    assert_eq!(summary.lineage, ["Chondrichthyes", "Lamniformes"]);
}

#[rstest]
fn given_species_when_updating_by_common_name_then_summary_reflects_change(
    mut catalog: CatalogService,
) {
    let updated = catalog
        .update_species("Great White Shark", "White Pointer", "")
        .unwrap();
    assert_eq!(updated.name, "carcharias");
    assert_eq!(updated.common_name.as_deref(), Some("White Pointer"));
    assert_eq!(updated.reference_link, None);
    assert!(catalog.lookup("Great White Shark").unwrap().is_none());
}

#[rstest]
fn given_family_when_updating_then_invalid_target(mut catalog: CatalogService) {
    let err = catalog.update_species("Lamnidae", "Mackerel sharks", "").unwrap_err();
    assert!(matches!(err, ApplicationError::Domain(DomainError::InvalidTarget(_))));
}

#[rstest]
fn given_unknown_species_when_updating_then_not_found(mut catalog: CatalogService) {
    let err = catalog.update_species("Megalodon", "Meg", "").unwrap_err();
    assert!(matches!(err, ApplicationError::NotFound(_)));
}

#[rstest]
fn given_species_when_deleting_then_genus_kept_and_lookup_misses(mut catalog: CatalogService) {
    let removed = catalog.delete_species("Tiger Shark").unwrap().expect("deleted");
    assert_eq!(removed.name(), "cuvier");
    assert!(catalog.lookup("cuvier").unwrap().is_none());
    assert_eq!(catalog.lookup("Galeocerdo").unwrap().unwrap().children, 0);
}

#[rstest]
#[case("  cuvier ")]
#[case("\tTiger Shark  ")]
fn given_padded_name_when_deleting_then_same_species_removed_as_lookup_finds(
    mut catalog: CatalogService,
    #[case] name: &str,
) {
    assert!(catalog.lookup(name).unwrap().is_some());

    let removed = catalog.delete_species(name).unwrap().expect("deleted");

    assert_eq!(removed.name(), "cuvier");
    assert!(catalog.lookup(name).unwrap().is_none());
    assert_eq!(catalog.tree().len(), 8);
}

#[rstest]
fn given_seeded_catalog_when_opening_link_then_opener_receives_url(opener: Arc<RecordingOpener>) {
    let mut catalog = CatalogService::new(opener.clone());
    catalog.seed_examples();

    let link = catalog.open_link("cuvier").unwrap();

    assert_eq!(link, "https://en.wikipedia.org/wiki/Tiger_shark");
    assert_eq!(opener.opened.lock().unwrap().as_slice(), [link]);
}

#[test]
fn given_non_http_link_when_opening_then_operation_failed_without_running_command() {
    let opener = Arc::new(SystemLinkOpener::new(None, Arc::new(FailingRunner)));
    let mut catalog = CatalogService::new(opener);
    catalog
        .add_species(&MAKO, "Shortfin Mako", "file:///etc/passwd")
        .unwrap();

    let err = catalog.open_link("Shortfin Mako").unwrap_err();
    match err {
        ApplicationError::OperationFailed { source, .. } => {
            assert!(source.to_string().contains("non-http"))
        }
        other => panic!("expected OperationFailed, got {other:?}"),
    }
}

#[test]
fn given_missing_opener_program_when_opening_then_operation_failed() {
    let opener = Arc::new(SystemLinkOpener::new(
        Some("no-such-browser --new-tab".to_string()),
        Arc::new(FailingRunner),
    ));
    let mut catalog = CatalogService::new(opener);
    catalog.seed_examples();

    let err = catalog.open_link("Great White Shark").unwrap_err();
    assert!(matches!(err, ApplicationError::OperationFailed { .. }));
    assert!(err.to_string().contains("open link"));
}

#[rstest]
fn given_seeded_catalog_when_traversing_levelorder_then_class_first_species_last(
    catalog: CatalogService,
) {
    let visited = catalog.traverse(Traversal::LevelOrder);
    assert_eq!(visited.len(), 9);
    assert_eq!(visited[0], (Rank::Class, "Chondrichthyes".to_string()));
    assert_eq!(
        &visited[7..],
        [
            (Rank::Species, "carcharias".to_string()),
            (Rank::Species, "cuvier".to_string())
        ]
    );
}

#[rstest]
fn given_seeded_catalog_when_clearing_then_all_nodes_released(mut catalog: CatalogService) {
    assert_eq!(catalog.clear(), 9);
    assert!(catalog.tree().is_empty());
    assert!(catalog.render().starts_with("(empty)"));
}
