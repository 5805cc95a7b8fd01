//! Service layer API for voyage reporting and cascade edits
//!
//! Wraps the pure engine modules with persistence. Reports, voyages and
//! vessels are stored as CBOR rows keyed by their bech32 ids; every
//! multi-record write goes through a single sled batch so a cascade apply
//! is atomic.
use crate::cascade::{self, CascadeInput, CascadeResult, FieldModification};
use crate::error::ModifyError;
use crate::fuel::FuelLevels;
use crate::ledger;
use crate::report::{Report, ReportDetails, ReportDraft, ReportStatus};
use crate::utils;
use crate::validate;
use crate::voyage::{Vessel, Voyage};
use sled::Batch;
use std::sync::Arc;

pub struct VoyageService {
    instance: Arc<sled::Db>,
    // in future we could add a config for report approval constraints
}

impl VoyageService {
    pub fn new(instance: Arc<sled::Db>) -> Self {
        Self { instance }
    }

    fn load<T>(&self, id: &str) -> anyhow::Result<Option<T>>
    where
        T: for<'b> minicbor::Decode<'b, ()>,
    {
        match self.instance.get(id.as_bytes())? {
            Some(bytes) => Ok(Some(minicbor::decode(&bytes)?)),
            None => Ok(None),
        }
    }

    fn load_report(&self, report_id: &str) -> anyhow::Result<Report> {
        self.load(report_id)?
            .ok_or_else(|| ModifyError::NotFound(report_id.to_string()).into())
    }

    fn load_voyage(&self, voyage_id: &str) -> anyhow::Result<Voyage> {
        self.load(voyage_id)?
            .ok_or_else(|| anyhow::anyhow!("voyage {voyage_id} was not found"))
    }

    fn load_vessel(&self, vessel_id: &str) -> anyhow::Result<Vessel> {
        self.load(vessel_id)?
            .ok_or_else(|| anyhow::anyhow!("vessel {vessel_id} was not found"))
    }

    /// Register a vessel together with the ROB in effect before its first
    /// departure report.
    pub fn register_vessel(
        &self,
        name: &str,
        initial_rob: FuelLevels,
    ) -> anyhow::Result<Vessel> {
        let vessel = Vessel {
            id: utils::new_uuid_to_bech32("vsl_")?,
            name: name.to_string(),
            initial_rob,
        };
        self.instance
            .insert(vessel.id.as_bytes(), minicbor::to_vec(&vessel)?)?;
        Ok(vessel)
    }

    /// Open a voyage for a vessel with its authoritative total distance.
    pub fn open_voyage(&self, vessel_id: &str, voyage_distance: f64) -> anyhow::Result<Voyage> {
        // The vessel must exist; its initial ROB seeds the first report.
        self.load_vessel(vessel_id)?;

        let voyage = Voyage::new(
            utils::new_uuid_to_bech32("voy_")?,
            vessel_id.to_string(),
            voyage_distance,
        );
        self.instance
            .insert(voyage.id.as_bytes(), minicbor::to_vec(&voyage)?)?;
        Ok(voyage)
    }

    /// The last report of the voyage that still counts as the chain tail.
    /// Rejected reports fall out of the chain entirely.
    fn chain_tail(&self, voyage: &Voyage) -> anyhow::Result<Option<Report>> {
        for report_id in voyage.report_ids.iter().rev() {
            let report = self.load_report(report_id)?;
            if report.status != ReportStatus::Rejected {
                return Ok(Some(report));
            }
        }
        Ok(None)
    }

    /// Compute a report's derived ledger fields from its predecessor (or the
    /// vessel baseline) and assemble the stored row.
    fn materialise(
        &self,
        draft: ReportDraft,
        previous: Option<&Report>,
        vessel: &Vessel,
        voyage: &Voyage,
        report_id: String,
    ) -> Report {
        let previous_rob = previous.map_or(vessel.initial_rob, |p| p.rob);
        let rob = ledger::next_rob(&previous_rob, &draft.bunkers);

        let mut details = draft.details;
        let figures = match &details {
            ReportDetails::Departure {
                harbour_distance, ..
            } => ledger::distance_figures(
                0.0,
                *harbour_distance,
                voyage.voyage_distance,
                draft.sailing_time_voyage,
            ),
            ReportDetails::Noon {
                distance_since_last_report,
                ..
            }
            | ReportDetails::Arrival {
                distance_since_last_report,
                ..
            }
            | ReportDetails::ArrivalAnchorNoon {
                distance_since_last_report,
                ..
            } => ledger::distance_figures(
                previous.map_or(0.0, |p| p.total_distance_travelled),
                *distance_since_last_report,
                voyage.voyage_distance,
                draft.sailing_time_voyage,
            ),
            ReportDetails::Berth { .. } => ledger::distance_figures(
                previous.map_or(0.0, |p| p.total_distance_travelled),
                0.0,
                voyage.voyage_distance,
                draft.sailing_time_voyage,
            ),
        };

        if let ReportDetails::Berth {
            cargo_loaded,
            cargo_unloaded,
            cargo_quantity,
            cargo_status,
            ..
        } = &mut details
        {
            let previous_quantity = previous.and_then(Report::cargo_quantity).unwrap_or(0.0);
            let (quantity, status) =
                ledger::cargo_balance(previous_quantity, *cargo_loaded, *cargo_unloaded);
            *cargo_quantity = quantity;
            *cargo_status = status;
        }

        Report {
            id: report_id,
            voyage_id: voyage.id.clone(),
            status: ReportStatus::Pending,
            seq: None,
            reported_at: draft.reported_at,
            bunkers: draft.bunkers,
            rob,
            total_distance_travelled: figures.total_distance_travelled,
            distance_to_go: figures.distance_to_go,
            avg_speed_voyage: figures.avg_speed_voyage,
            sailing_time_voyage: draft.sailing_time_voyage,
            details,
        }
    }

    /// Submit a new report to the voyage chain. Sequence, passage, field and
    /// machinery checks all run before anything is written; a failure aborts
    /// the whole submission.
    pub fn submit_report(&self, draft: ReportDraft) -> anyhow::Result<Report> {
        let mut voyage = self.load_voyage(&draft.voyage_id)?;
        let vessel = self.load_vessel(&voyage.vessel_id)?;
        let previous = self.chain_tail(&voyage)?;

        validate::check_sequence(
            previous.as_ref().map(Report::report_type),
            draft.details.report_type(),
        )?;
        if let ReportDetails::Noon { passage, .. } = &draft.details {
            validate::check_passage(
                previous.as_ref().and_then(Report::passage_state),
                passage.state(),
            )?;
        }

        let report_id = utils::new_uuid_to_bech32("rpt_")?;
        let report = self.materialise(draft, previous.as_ref(), &vessel, &voyage, report_id);
        validate::check_fields(&report)?;

        voyage.report_ids.push(report.id.clone());

        let mut batch = Batch::default();
        batch.insert(report.id.as_bytes(), minicbor::to_vec(&report)?);
        batch.insert(voyage.id.as_bytes(), minicbor::to_vec(&voyage)?);
        self.instance.apply_batch(batch)?;

        Ok(report)
    }

    /// Approve a report, assigning its position in the approved chain. The
    /// sequence number, not the reported timestamp, orders every later
    /// cascade.
    pub fn approve_report(&self, report_id: &str) -> anyhow::Result<Report> {
        let mut report = self.load_report(report_id)?;
        if !matches!(
            report.status,
            ReportStatus::Pending | ReportStatus::ChangesRequested
        ) {
            return Err(anyhow::anyhow!(
                "report {report_id} cannot be approved from {:?}",
                report.status
            ));
        }

        let mut voyage = self.load_voyage(&report.voyage_id)?;
        report.seq = Some(voyage.next_seq);
        report.status = ReportStatus::Approved;
        voyage.next_seq += 1;

        let mut batch = Batch::default();
        batch.insert(report.id.as_bytes(), minicbor::to_vec(&report)?);
        batch.insert(voyage.id.as_bytes(), minicbor::to_vec(&voyage)?);
        self.instance.apply_batch(batch)?;

        Ok(report)
    }

    pub fn reject_report(&self, report_id: &str) -> anyhow::Result<Report> {
        self.set_review_status(report_id, ReportStatus::Rejected)
    }

    pub fn request_changes(&self, report_id: &str) -> anyhow::Result<Report> {
        self.set_review_status(report_id, ReportStatus::ChangesRequested)
    }

    fn set_review_status(
        &self,
        report_id: &str,
        status: ReportStatus,
    ) -> anyhow::Result<Report> {
        let mut report = self.load_report(report_id)?;
        if report.status != ReportStatus::Pending {
            return Err(anyhow::anyhow!(
                "report {report_id} is not pending review, current status {:?}",
                report.status
            ));
        }
        report.status = status;
        self.instance
            .insert(report.id.as_bytes(), minicbor::to_vec(&report)?)?;
        Ok(report)
    }

    /// Replace a not-yet-approved report's inputs and recompute its derived
    /// fields in place. Runs the full submission validation again.
    pub fn update_pending_report(
        &self,
        report_id: &str,
        draft: ReportDraft,
    ) -> anyhow::Result<Report> {
        let stored = self.load_report(report_id)?;
        if !matches!(
            stored.status,
            ReportStatus::Pending | ReportStatus::ChangesRequested
        ) {
            return Err(anyhow::anyhow!(
                "report {report_id} is already {:?}; approved reports change through cascade edits",
                stored.status
            ));
        }
        if draft.voyage_id != stored.voyage_id {
            return Err(anyhow::anyhow!(
                "report {report_id} belongs to voyage {}, not {}",
                stored.voyage_id,
                draft.voyage_id
            ));
        }

        let voyage = self.load_voyage(&stored.voyage_id)?;
        let vessel = self.load_vessel(&voyage.vessel_id)?;

        // Validate against the report immediately before this one in the
        // chain, not the tail.
        let previous = self.predecessor_in_chain(&voyage, report_id)?;
        validate::check_sequence(
            previous.as_ref().map(Report::report_type),
            draft.details.report_type(),
        )?;
        if let ReportDetails::Noon { passage, .. } = &draft.details {
            validate::check_passage(
                previous.as_ref().and_then(Report::passage_state),
                passage.state(),
            )?;
        }

        let report =
            self.materialise(draft, previous.as_ref(), &vessel, &voyage, stored.id.clone());
        validate::check_fields(&report)?;

        self.instance
            .insert(report.id.as_bytes(), minicbor::to_vec(&report)?)?;
        Ok(report)
    }

    fn predecessor_in_chain(
        &self,
        voyage: &Voyage,
        report_id: &str,
    ) -> anyhow::Result<Option<Report>> {
        let position = voyage
            .report_ids
            .iter()
            .position(|id| id == report_id)
            .ok_or_else(|| anyhow::anyhow!("report {report_id} is not part of the voyage"))?;
        for id in voyage.report_ids[..position].iter().rev() {
            let report = self.load_report(id)?;
            if report.status != ReportStatus::Rejected {
                return Ok(Some(report));
            }
        }
        Ok(None)
    }

    /// Edit an already-approved report and cascade the deltas across every
    /// later approved report of the voyage.
    ///
    /// With `preview_only` the result is returned unpersisted, for
    /// confirmation flows. Otherwise a valid cascade is written in one
    /// batch: the source's edited state plus every affected report's
    /// recomputed state. An invalid cascade writes nothing.
    pub fn modify_report(
        &self,
        report_id: &str,
        modifications: &[FieldModification],
        preview_only: bool,
    ) -> anyhow::Result<CascadeResult> {
        let source = self.load_report(report_id)?;
        if source.status != ReportStatus::Approved {
            return Err(ModifyError::NotApproved(report_id.to_string()).into());
        }
        let source_seq = source
            .seq
            .ok_or_else(|| anyhow::anyhow!("approved report {report_id} carries no sequence"))?;

        let mut voyage = self.load_voyage(&source.voyage_id)?;
        let vessel = self.load_vessel(&voyage.vessel_id)?;

        let mut approved: Vec<Report> = vec![];
        for id in &voyage.report_ids {
            let report = self.load_report(id)?;
            if report.status == ReportStatus::Approved && report.id != source.id {
                approved.push(report);
            }
        }
        approved.sort_by_key(|r| r.seq);

        let predecessor = approved
            .iter()
            .filter(|r| r.seq < Some(source_seq))
            .next_back();
        let later: Vec<Report> = approved
            .iter()
            .filter(|r| r.seq > Some(source_seq))
            .cloned()
            .collect();

        let result = cascade::run(
            &CascadeInput {
                source: &source,
                predecessor,
                initial_rob: &vessel.initial_rob,
                voyage: &voyage,
                later: &later,
            },
            modifications,
        )?;

        if preview_only {
            return Ok(result);
        }
        if !result.is_valid {
            return Err(ModifyError::InvalidCascade(result.violations.len()).into());
        }

        // One batch covers the source and every ripple, so a crash cannot
        // leave the ledger half-updated.
        let mut batch = Batch::default();
        for affected in &result.affected {
            batch.insert(
                affected.state.id.as_bytes(),
                minicbor::to_vec(&affected.state)?,
            );
        }
        if result.voyage_distance != voyage.voyage_distance {
            voyage.voyage_distance = result.voyage_distance;
            batch.insert(voyage.id.as_bytes(), minicbor::to_vec(&voyage)?);
        }
        self.instance.apply_batch(batch)?;

        Ok(result)
    }

    pub fn report(&self, report_id: &str) -> anyhow::Result<Report> {
        self.load_report(report_id)
    }

    pub fn voyage(&self, voyage_id: &str) -> anyhow::Result<Voyage> {
        self.load_voyage(voyage_id)
    }

    /// Every report of the voyage in submission order, all statuses.
    pub fn voyage_reports(&self, voyage_id: &str) -> anyhow::Result<Vec<Report>> {
        let voyage = self.load_voyage(voyage_id)?;
        voyage
            .report_ids
            .iter()
            .map(|id| self.load_report(id))
            .collect()
    }
}
