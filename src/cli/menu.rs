//! Interactive numbered menu
//!
//! Reads answers line by line from any `BufRead`, so sessions can be scripted.
//! End of input ends the session the same way as choosing Exit. Releasing the
//! tree afterwards is up to the caller.

use std::io::BufRead;

use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::{ApplicationError, CatalogService, NodeSummary};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::domain::{DomainError, Rank, SpeciesStatus, Traversal};
use crate::infrastructure::InfraError;

/// Entries of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    Search,
    Display,
    Traverse,
    Update,
    Delete,
    Exit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 7] = [
        MenuChoice::Add,
        MenuChoice::Search,
        MenuChoice::Display,
        MenuChoice::Traverse,
        MenuChoice::Update,
        MenuChoice::Delete,
        MenuChoice::Exit,
    ];

    /// Parse the number typed by the user (1-based).
    pub fn parse(input: &str) -> Option<MenuChoice> {
        let n: usize = input.trim().parse().ok()?;
        Self::ALL.get(n.checked_sub(1)?).copied()
    }

    fn label(self) -> &'static str {
        match self {
            MenuChoice::Add => "Add new species path",
            MenuChoice::Search => "Search taxonomic or common name",
            MenuChoice::Display => "Display full taxonomy tree",
            MenuChoice::Traverse => "Traversal menu",
            MenuChoice::Update => "Update species details",
            MenuChoice::Delete => "Delete species",
            MenuChoice::Exit => "Exit",
        }
    }
}

enum Flow {
    Continue,
    Exit,
}

/// Menu loop bound to an input source.
pub struct Menu<R: BufRead> {
    input: R,
    confirm_delete: bool,
}

impl<R: BufRead> Menu<R> {
    pub fn new(input: R, confirm_delete: bool) -> Self {
        Self {
            input,
            confirm_delete,
        }
    }

    /// Run until Exit or end of input.
    ///
    /// Rejected operations are reported and the loop continues; only failures
    /// reading the input end the session with an error.
    #[instrument(level = "debug", skip_all)]
    pub fn run(&mut self, catalog: &mut CatalogService) -> CliResult<()> {
        loop {
            output::info("");
            output::header("===== TAXONOMY TREE =====");
            for (i, choice) in MenuChoice::ALL.iter().enumerate() {
                output::info(&format!("{}. {}", i + 1, choice.label()));
            }
            let Some(answer) = self.ask("Choose:")? else {
                return Ok(());
            };
            let Some(choice) = MenuChoice::parse(&answer) else {
                output::warning(&format!("invalid choice '{}', try again", answer));
                continue;
            };
            debug!("menu choice: {:?}", choice);

            let flow = match choice {
                MenuChoice::Add => self.add(catalog),
                MenuChoice::Search => self.search(catalog),
                MenuChoice::Display => self.display(catalog),
                MenuChoice::Traverse => self.traverse(catalog),
                MenuChoice::Update => self.update(catalog),
                MenuChoice::Delete => self.delete(catalog),
                MenuChoice::Exit => Ok(Flow::Exit),
            };
            match flow {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => return Ok(()),
                Err(e @ CliError::Infra(InfraError::Io { .. })) => return Err(e),
                Err(e) => output::error(&e),
            }
        }
    }

    fn read_line(&mut self) -> CliResult<Option<String>> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(|e| InfraError::io("read input", e))?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn ask(&mut self, question: &str) -> CliResult<Option<String>> {
        output::prompt(question);
        self.read_line()
    }

    fn confirm(&mut self, question: &str) -> CliResult<bool> {
        Ok(self
            .ask(&format!("{} (y/n):", question))?
            .is_some_and(|a| a.eq_ignore_ascii_case("y") || a.eq_ignore_ascii_case("yes")))
    }

    fn add(&mut self, catalog: &mut CatalogService) -> CliResult<Flow> {
        output::header("--- Add New Species ---");
        let mut segments = Vec::with_capacity(Rank::LEVELS);
        for rank in Rank::ALL {
            let Some(name) = self.ask(&format!("Enter {} name:", rank))? else {
                return Ok(Flow::Exit);
            };
            if name.is_empty() {
                output::warning(&format!("{} name cannot be empty, insertion aborted", rank));
                return Ok(Flow::Continue);
            }
            segments.push(name);
        }
        let Some(common_name) = self.ask("Enter common name:")? else {
            return Ok(Flow::Exit);
        };
        let Some(link) = self.ask("Enter reference link (URL, optional):")? else {
            return Ok(Flow::Exit);
        };

        let report = catalog.add_species(segments.as_slice(), &common_name, &link)?;
        for (rank, name) in report.created.iter().filter(|(rank, _)| !rank.is_species()) {
            output::action("Inserted", &format!("new {}: {}", rank, name));
        }
        let species = &segments[Rank::Species.depth()];
        match report.species_status {
            SpeciesStatus::Added => {
                output::success(&format!("Added new species: {} ({})", common_name, species))
            }
            SpeciesStatus::Updated => output::success(&format!(
                "Species '{}' already exists, updated common name/link",
                species
            )),
            SpeciesStatus::Unchanged => output::info(&format!(
                "Species '{}' already exists with the same details",
                species
            )),
        }
        Ok(Flow::Continue)
    }

    fn search(&mut self, catalog: &mut CatalogService) -> CliResult<Flow> {
        output::header("--- Search Name ---");
        let Some(query) = self.ask("Enter a taxonomic or common name:")? else {
            return Ok(Flow::Exit);
        };
        let Some(summary) = catalog.lookup(&query)? else {
            output::info(&format!("'{}' not found", query));
            return Ok(Flow::Continue);
        };

        print_summary(&summary);
        if summary.reference_link.is_some() {
            if self.confirm("Open the link now?")? {
                let link = catalog.open_link(&query)?;
                output::action("Opened", &link);
            }
        } else if summary.rank.is_species() {
            output::info("No reference link recorded for this species.");
        }
        Ok(Flow::Continue)
    }

    fn display(&mut self, catalog: &mut CatalogService) -> CliResult<Flow> {
        output::header("--- Full Taxonomy Tree ---");
        if catalog.tree().is_empty() {
            output::info("The tree is currently empty.");
        } else {
            output::info(&catalog.render());
        }
        Ok(Flow::Continue)
    }

    fn traverse(&mut self, catalog: &mut CatalogService) -> CliResult<Flow> {
        if catalog.tree().is_empty() {
            output::info("Tree is empty, nothing to traverse.");
            return Ok(Flow::Continue);
        }
        output::header("--- Traversal Menu ---");
        output::info("1. Pre-order (node, children)");
        output::info("2. Post-order (children, node)");
        output::info("3. Level-order (breadth first)");
        let Some(answer) = self.ask("Choose traversal:")? else {
            return Ok(Flow::Exit);
        };
        let order = match answer.as_str() {
            "1" => Traversal::PreOrder,
            "2" => Traversal::PostOrder,
            "3" => Traversal::LevelOrder,
            other => {
                output::warning(&format!("invalid traversal choice '{}'", other));
                return Ok(Flow::Continue);
            }
        };
        print_traversal(catalog, order);
        Ok(Flow::Continue)
    }

    fn update(&mut self, catalog: &mut CatalogService) -> CliResult<Flow> {
        output::header("--- Update Species Details ---");
        let Some(name) = self.ask("Enter the taxonomic or common name of the species:")? else {
            return Ok(Flow::Exit);
        };
        let Some(current) = self.species_summary(catalog, &name)? else {
            return Ok(Flow::Continue);
        };

        output::action(
            "Found",
            &format!(
                "{} ({})",
                current.common_name.as_deref().unwrap_or("-"),
                current.name
            ),
        );
        let Some(common_name) = self.ask(&format!(
            "Enter new common name (current: {}):",
            current.common_name.as_deref().unwrap_or("")
        ))?
        else {
            return Ok(Flow::Exit);
        };
        let Some(link) = self.ask(&format!(
            "Enter new reference link (current: {}):",
            current.reference_link.as_deref().unwrap_or("")
        ))?
        else {
            return Ok(Flow::Exit);
        };

        let updated = catalog.update_species(&name, &common_name, &link)?;
        output::success(&format!("Species '{}' details updated", updated.name));
        Ok(Flow::Continue)
    }

    fn delete(&mut self, catalog: &mut CatalogService) -> CliResult<Flow> {
        output::header("--- Delete Species ---");
        let Some(name) = self.ask("Enter the taxonomic or common name of the species:")? else {
            return Ok(Flow::Exit);
        };
        let Some(target) = self.species_summary(catalog, &name)? else {
            return Ok(Flow::Continue);
        };

        let question = format!(
            "Delete species '{} ({})'?",
            target.common_name.as_deref().unwrap_or("-"),
            target.name
        );
        if self.confirm_delete && !self.confirm(&question)? {
            output::info("Deletion cancelled.");
            return Ok(Flow::Continue);
        }
        match catalog.delete_species(&name)? {
            Some(removed) => output::success(&format!("Species '{}' deleted", removed.name())),
            None => output::info(&format!("Species '{}' not found", name)),
        }
        Ok(Flow::Continue)
    }

    /// Lookup that reports a missing or non-species target to the user.
    fn species_summary(
        &self,
        catalog: &CatalogService,
        name: &str,
    ) -> CliResult<Option<NodeSummary>> {
        match catalog.lookup(name)? {
            None => {
                output::info(&format!("Species '{}' not found", name));
                Ok(None)
            }
            Some(summary) if !summary.rank.is_species() => {
                Err(ApplicationError::from(DomainError::InvalidTarget(format!(
                    "'{}' is a {}, only species can be changed",
                    summary.name, summary.rank
                )))
                .into())
            }
            Some(summary) => Ok(Some(summary)),
        }
    }
}

/// Print the fields of a looked-up node.
pub fn print_summary(summary: &NodeSummary) {
    output::success(&format!("Found '{}'", summary.name));
    output::detail(&format!("Rank: {}", summary.rank));
    output::detail(&format!("Taxonomic name: {}", summary.name));
    if let Some(common_name) = &summary.common_name {
        output::detail(&format!("Common name: {}", common_name));
    }
    if let Some(link) = &summary.reference_link {
        output::detail(&format!("Reference link: {}", link));
    }
    output::detail(&format!("Lineage: {}", summary.lineage.iter().join(" > ")));
    output::detail(&format!("Children: {}", summary.children));
}

/// Print each node of a traversal as `(Rank) name`.
pub fn print_traversal(catalog: &CatalogService, order: Traversal) {
    output::header(&format!("[{} traversal]", order));
    for (rank, name) in catalog.traverse(order) {
        output::detail(&format!("({}) {}", rank, name));
    }
}
