//! Batch pipeline: partition → validate → parallel per-subgraph analysis →
//! ordered merge, with events and a tracing summary per dataset.

use std::time::Instant;

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use riskgraph_core::config::RiskGraphConfig;
use riskgraph_core::errors::{GraphError, PipelineError, PipelineResult};
use riskgraph_core::events::types::{
    Dataset, DatasetCompleteEvent, DatasetStartedEvent, SubgraphRejectedEvent, TriadConfirmedEvent,
};
use riskgraph_core::events::EventDispatcher;
use riskgraph_core::tracing::metrics;

use crate::collection::{
    build_pattern_graph, CollectionGraph, MatchRules, NetFlowAnalyzer, PatternGraph,
    ShellEnterpriseMatcher, Triad,
};
use crate::control::{ControlGraph, RootOutcome, RootResolver};
use crate::graph::{validate_subgraph, EntityGraph, GraphPartitioner, Keyed};
use crate::guarantee::{
    ClassificationStats, GuaranteeGraph, GuaranteeRules, RiskClassifier, RiskQuantifier,
};

/// A subgraph that passed validation, tagged with its partition index.
#[derive(Debug, Clone)]
pub struct Analyzed<G> {
    pub id: usize,
    pub graph: G,
}

#[derive(Debug, Default)]
pub struct GuaranteeReport {
    pub subgraphs: Vec<Analyzed<GuaranteeGraph>>,
    pub mutual_pairs: usize,
    pub circles: usize,
    pub rejected: usize,
}

#[derive(Debug, Default)]
pub struct CollectionReport {
    pub subgraphs: Vec<Analyzed<CollectionGraph>>,
    /// Confirmed triads in subgraph order.
    pub triads: Vec<Triad>,
    pub pattern: PatternGraph,
    pub rejected: usize,
}

#[derive(Debug, Default)]
pub struct ControlReport {
    pub subgraphs: Vec<Analyzed<ControlGraph>>,
    /// Subgraphs with an ultimate controller.
    pub rooted: usize,
    pub cross_held: usize,
    pub rejected: usize,
}

/// Runs the three dataset analyses. Subgraphs share no state, so each one
/// is handled by a single rayon worker without locking.
pub struct RiskPipeline {
    config: RiskGraphConfig,
    dispatcher: EventDispatcher,
    pool: Option<ThreadPool>,
}

impl RiskPipeline {
    /// Build a pipeline. A dedicated pool is created when
    /// `runtime.threads > 0`; otherwise rayon's global pool is used.
    pub fn new(config: RiskGraphConfig, dispatcher: EventDispatcher) -> Result<Self, PipelineError> {
        let threads = config.runtime.effective_threads();
        let pool = if threads > 0 {
            let pool = ThreadPoolBuilder::new()
                .num_threads(threads)
                .thread_name(|i| format!("riskgraph-worker-{i}"))
                .build()
                .map_err(|e| PipelineError::ThreadPool(e.to_string()))?;
            Some(pool)
        } else {
            None
        };
        Ok(Self {
            config,
            dispatcher,
            pool,
        })
    }

    pub fn config(&self) -> &RiskGraphConfig {
        &self.config
    }

    /// Guarantee risk typing and exposure scoring.
    pub fn run_guarantee(&self, graph: GuaranteeGraph) -> PipelineResult<GuaranteeReport> {
        let started = Instant::now();
        let parts = self.partition(Dataset::Guarantee, graph);
        let subgraph_count = parts.len();

        let classifier = RiskClassifier::new(GuaranteeRules::from_config(&self.config.guarantee));
        let quantifier = RiskQuantifier::from_config(&self.config.guarantee);
        let outcomes = self.fan_out(
            parts,
            |id, mut sub: GuaranteeGraph| -> Result<(GuaranteeGraph, ClassificationStats), GraphError> {
                validate_subgraph(id, &sub)?;
                let stats = classifier.classify(&mut sub);
                quantifier.quantify(&mut sub);
                Ok((sub, stats))
            },
        );

        let mut result = PipelineResult::<GuaranteeReport>::default();
        for Analyzed { id, graph: (graph, stats) } in
            self.settle(Dataset::Guarantee, outcomes, &mut result.errors)
        {
            result.data.mutual_pairs += stats.mutual_pairs;
            result.data.circles += stats.circles;
            result.data.subgraphs.push(Analyzed { id, graph });
        }
        result.data.rejected = subgraph_count - result.data.subgraphs.len();

        tracing::info!(
            mutual_pairs = result.data.mutual_pairs,
            circles = result.data.circles,
            "guarantee roles assigned"
        );
        self.finish(Dataset::Guarantee, subgraph_count, result.data.rejected, started);
        result
    }

    /// Shell-enterprise matching and net-flow scoring.
    pub fn run_collection(&self, graph: CollectionGraph) -> PipelineResult<CollectionReport> {
        let started = Instant::now();
        let parts = self.partition(Dataset::Collection, graph);
        let subgraph_count = parts.len();

        let matcher = ShellEnterpriseMatcher::new(MatchRules::from_config(&self.config.collection));
        let analyzer = NetFlowAnalyzer::from_config(&self.config.collection);
        let outcomes = self.fan_out(
            parts,
            |id, mut sub: CollectionGraph| -> Result<(CollectionGraph, Vec<Triad>), GraphError> {
                validate_subgraph(id, &sub)?;
                let triads = matcher.find_triads(&sub);
                analyzer.analyze(&mut sub);
                Ok((sub, triads))
            },
        );

        let mut result = PipelineResult::<CollectionReport>::default();
        for Analyzed { id, graph: (graph, triads) } in
            self.settle(Dataset::Collection, outcomes, &mut result.errors)
        {
            for triad in &triads {
                self.dispatcher.emit_triad_confirmed(&TriadConfirmedEvent {
                    origin: triad.origin.clone(),
                    pass_through: triad.pass_through.clone(),
                    recipient: triad.recipient.clone(),
                    ratio: triad.ratio,
                });
            }
            result.data.triads.extend(triads);
            result.data.subgraphs.push(Analyzed { id, graph });
        }
        result.data.pattern = build_pattern_graph(&result.data.triads);
        result.data.rejected = subgraph_count - result.data.subgraphs.len();

        tracing::info!(
            { metrics::TRIAD_COUNT } = result.data.triads.len(),
            pattern_accounts = result.data.pattern.entity_count(),
            "shell-enterprise matching complete"
        );
        self.finish(Dataset::Collection, subgraph_count, result.data.rejected, started);
        result
    }

    /// Ultimate-controller and cross-holding resolution.
    pub fn run_control(&self, graph: ControlGraph) -> PipelineResult<ControlReport> {
        let started = Instant::now();
        let parts = self.partition(Dataset::Control, graph);
        let subgraph_count = parts.len();

        let outcomes = self.fan_out(
            parts,
            |id, mut sub: ControlGraph| -> Result<(ControlGraph, RootOutcome), GraphError> {
                validate_subgraph(id, &sub)?;
                let outcome = RootResolver::resolve(&mut sub);
                Ok((sub, outcome))
            },
        );

        let mut result = PipelineResult::<ControlReport>::default();
        for Analyzed { id, graph: (graph, outcome) } in
            self.settle(Dataset::Control, outcomes, &mut result.errors)
        {
            if outcome.root.is_some() {
                result.data.rooted += 1;
            }
            result.data.cross_held += outcome.cross_held;
            result.data.subgraphs.push(Analyzed { id, graph });
        }
        result.data.rejected = subgraph_count - result.data.subgraphs.len();

        tracing::info!(
            rooted = result.data.rooted,
            cross_held = result.data.cross_held,
            "control roots resolved"
        );
        self.finish(Dataset::Control, subgraph_count, result.data.rejected, started);
        result
    }

    fn partition<N: Keyed, E>(&self, dataset: Dataset, graph: EntityGraph<N, E>) -> Vec<EntityGraph<N, E>> {
        let entity_count = graph.entity_count();
        let relationship_count = graph.relationship_count();
        let parts = GraphPartitioner::partition(graph);
        self.dispatcher.emit_dataset_started(&DatasetStartedEvent {
            dataset,
            entity_count,
            relationship_count,
            subgraph_count: parts.len(),
        });
        parts
    }

    /// Map `work` over `items` in parallel, keeping input order.
    fn fan_out<T, R, F>(&self, items: Vec<T>, work: F) -> Vec<R>
    where
        T: Send,
        R: Send,
        F: Fn(usize, T) -> R + Sync + Send,
    {
        let run = || {
            items
                .into_par_iter()
                .enumerate()
                .map(|(id, item)| work(id, item))
                .collect::<Vec<R>>()
        };
        match &self.pool {
            Some(pool) => pool.install(run),
            None => run(),
        }
    }

    /// Split outcomes into accepted subgraphs and recorded rejections.
    fn settle<G>(
        &self,
        dataset: Dataset,
        outcomes: Vec<Result<G, GraphError>>,
        errors: &mut Vec<PipelineError>,
    ) -> Vec<Analyzed<G>> {
        let mut accepted = Vec::with_capacity(outcomes.len());
        for (id, outcome) in outcomes.into_iter().enumerate() {
            match outcome {
                Ok(graph) => accepted.push(Analyzed { id, graph }),
                Err(e) => {
                    tracing::warn!(%dataset, subgraph = id, error = %e, "subgraph rejected");
                    self.dispatcher.emit_subgraph_rejected(&SubgraphRejectedEvent {
                        dataset,
                        subgraph_id: id,
                        message: e.to_string(),
                    });
                    errors.push(e.into());
                }
            }
        }
        accepted
    }

    fn finish(&self, dataset: Dataset, processed: usize, rejected: usize, started: Instant) {
        let duration_ms = started.elapsed().as_millis() as u64;
        tracing::info!(
            %dataset,
            { metrics::SUBGRAPH_COUNT } = processed,
            { metrics::REJECTED_COUNT } = rejected,
            { metrics::DATASET_TIME_MS } = duration_ms,
            "dataset complete"
        );
        self.dispatcher.emit_dataset_complete(&DatasetCompleteEvent {
            dataset,
            processed,
            rejected,
            duration_ms,
        });
    }
}
