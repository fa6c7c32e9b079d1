//! The three flows wired to one network's deployments.

use std::sync::Arc;

use alloy_primitives::Address;
use splitter_chain::ChainClient;
use splitter_tracker::{TrackerConfig, TransactionTracker};
use splitter_types::{NetworkId, RecipientSpec, SplitterSnapshot};
use tracing::{info, warn};

use crate::aggregator::SplitterReader;
use crate::distribution::{Distributed, Distributor};
use crate::error::SplitterError;
use crate::factory::{CreationResult, SplitterFactory};

/// Outcome of [`SplitterService::distribute`].
#[derive(Debug)]
pub struct DistributionReport {
    pub distributed: Distributed,
    /// The splitter re-read after confirmation. The distribution itself
    /// succeeded even when this is an error.
    pub refreshed: Result<SplitterSnapshot, SplitterError>,
}

pub struct SplitterService<C> {
    network: NetworkId,
    reader: SplitterReader<C>,
    factory: SplitterFactory<C>,
    distributor: Distributor<C>,
}

impl<C: ChainClient + 'static> SplitterService<C> {
    /// Use `network`'s factory and token deployments over `client`.
    pub fn new(client: Arc<C>, network: NetworkId, tracker_config: TrackerConfig) -> Self {
        Self::with_addresses(
            client,
            network,
            network.factory_address(),
            network.token_address(),
            tracker_config,
        )
    }

    /// Like [`new`](Self::new) but for the network behind `chain_id`.
    pub fn for_chain_id(
        client: Arc<C>,
        chain_id: u64,
        tracker_config: TrackerConfig,
    ) -> Result<Self, SplitterError> {
        let network = NetworkId::from_chain_id(chain_id)?;
        Ok(Self::new(client, network, tracker_config))
    }

    /// Override the deployment addresses, e.g. for a local fork.
    pub fn with_addresses(
        client: Arc<C>,
        network: NetworkId,
        factory: Address,
        token: Address,
        tracker_config: TrackerConfig,
    ) -> Self {
        let tracker = TransactionTracker::new(Arc::clone(&client), tracker_config);
        Self {
            network,
            reader: SplitterReader::new(Arc::clone(&client), token),
            factory: SplitterFactory::new(Arc::clone(&client), tracker.clone(), factory),
            distributor: Distributor::new(client, tracker),
        }
    }

    pub fn network(&self) -> NetworkId {
        self.network
    }

    pub fn reader(&self) -> &SplitterReader<C> {
        &self.reader
    }

    pub fn factory(&self) -> &SplitterFactory<C> {
        &self.factory
    }

    pub fn distributor(&self) -> &Distributor<C> {
        &self.distributor
    }

    pub async fn create_splitter(
        &self,
        specs: &[RecipientSpec],
    ) -> Result<CreationResult, SplitterError> {
        let created = self.factory.create_splitter(specs).await?;
        info!(
            network = %self.network,
            splitter = %created.splitter,
            url = %self.network.address_url(&created.splitter),
            "splitter created"
        );
        Ok(created)
    }

    pub async fn read_splitter(&self, raw: &str) -> Result<SplitterSnapshot, SplitterError> {
        self.reader.read_splitter(raw).await
    }

    /// Distribute against `snapshot`'s balance, then re-read the splitter
    /// once.
    pub async fn distribute(
        &self,
        snapshot: &SplitterSnapshot,
    ) -> Result<DistributionReport, SplitterError> {
        let distributed = self
            .distributor
            .distribute(snapshot.address, Some(snapshot.balance))
            .await?;

        let refreshed = self.reader.read_snapshot(snapshot.address).await;
        if let Err(e) = &refreshed {
            warn!(splitter = %snapshot.address, error = %e, "refresh after distribution failed");
        }
        Ok(DistributionReport {
            distributed,
            refreshed,
        })
    }

    /// Read the splitter at `raw`, then distribute against what was read.
    pub async fn distribute_address(&self, raw: &str) -> Result<DistributionReport, SplitterError> {
        let snapshot = self.reader.read_splitter(raw).await?;
        self.distribute(&snapshot).await
    }
}
