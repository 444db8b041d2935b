//! gRPC client adapters implementing the domain ports
//!
//! These wrap the generated tonic clients so the aggregation engine can
//! drive the remote authorities through the same traits the authorities'
//! own stores implement. Transport and unclassified upstream failures
//! surface as [`CoreError::Unavailable`]; NOT_FOUND becomes `Ok(None)` or
//! `false`, never an error, because absence is an answer.

use async_trait::async_trait;
use tonic::transport::Channel;
use tonic::{Code, Request};

use lexigraph_domain::{CoreError, CoreResult, Relationship, Term, TermId, TermLookup};
use lexigraph_domain::RelationshipGraph;
use lexigraph_grpc::conversions::{
    relationship_from_proto, relationship_type_to_proto, term_from_proto, ConversionError,
};
use lexigraph_grpc::core_from_status;
use lexigraph_grpc::proto;
use lexigraph_grpc::proto::glossary_service_client::GlossaryServiceClient;
use lexigraph_grpc::proto::graph_service_client::GraphServiceClient;

fn malformed(err: ConversionError) -> CoreError {
    CoreError::Unavailable(format!("malformed upstream reply: {}", err))
}

/// [`TermLookup`] backed by the glossary authority over gRPC.
#[derive(Clone)]
pub struct GrpcTermLookup {
    client: GlossaryServiceClient<Channel>,
}

impl GrpcTermLookup {
    /// Wrap a channel to the glossary service.
    pub fn new(channel: Channel) -> Self {
        Self {
            client: GlossaryServiceClient::new(channel),
        }
    }
}

#[async_trait]
impl TermLookup for GrpcTermLookup {
    async fn exists(&self, id: &TermId) -> CoreResult<bool> {
        Ok(self.get_by_id(id).await?.is_some())
    }

    async fn get_by_id(&self, id: &TermId) -> CoreResult<Option<Term>> {
        let mut client = self.client.clone();
        let request = Request::new(proto::GetTermRequest {
            id: id.as_str().to_string(),
        });
        match client.get_term(request).await {
            Ok(resp) => Ok(Some(term_from_proto(resp.into_inner()).map_err(malformed)?)),
            Err(status) if status.code() == Code::NotFound => Ok(None),
            Err(status) => Err(core_from_status(&status)),
        }
    }

    async fn get_by_name(&self, name: &str) -> CoreResult<Option<Term>> {
        let mut client = self.client.clone();
        let request = Request::new(proto::GetTermByNameRequest {
            name: name.to_string(),
        });
        match client.get_term_by_name(request).await {
            Ok(resp) => Ok(Some(term_from_proto(resp.into_inner()).map_err(malformed)?)),
            Err(status) if status.code() == Code::NotFound => Ok(None),
            Err(status) => Err(core_from_status(&status)),
        }
    }

    async fn search(&self, query: &str) -> CoreResult<Vec<Term>> {
        let mut client = self.client.clone();
        let request = Request::new(proto::SearchTermsRequest {
            query: query.to_string(),
        });
        let list = client
            .search_terms(request)
            .await
            .map_err(|status| core_from_status(&status))?
            .into_inner();

        list.terms
            .into_iter()
            .map(|term| term_from_proto(term).map_err(malformed))
            .collect()
    }
}

/// [`RelationshipGraph`] backed by the graph authority over gRPC.
#[derive(Clone)]
pub struct GrpcRelationshipGraph {
    client: GraphServiceClient<Channel>,
}

impl GrpcRelationshipGraph {
    /// Wrap a channel to the graph service.
    pub fn new(channel: Channel) -> Self {
        Self {
            client: GraphServiceClient::new(channel),
        }
    }
}

#[async_trait]
impl RelationshipGraph for GrpcRelationshipGraph {
    async fn add_relationship(&self, relationship: &Relationship) -> CoreResult<()> {
        let mut client = self.client.clone();
        let request = Request::new(proto::AddRelationshipRequest {
            from_term_id: relationship.from.as_str().to_string(),
            to_term_id: relationship.to.as_str().to_string(),
            r#type: relationship_type_to_proto(relationship.kind) as i32,
        });
        client
            .add_relationship(request)
            .await
            .map_err(|status| core_from_status(&status))?;
        Ok(())
    }

    async fn relationships_for_term(&self, id: &TermId) -> CoreResult<Vec<Relationship>> {
        let mut client = self.client.clone();
        let request = Request::new(proto::GetRelationshipsForTermRequest {
            term_id: id.as_str().to_string(),
        });
        let resp = client
            .get_relationships_for_term(request)
            .await
            .map_err(|status| core_from_status(&status))?
            .into_inner();

        resp.relationships
            .into_iter()
            .map(|rel| relationship_from_proto(rel).map_err(malformed))
            .collect()
    }

    async fn delete_relationship(&self, from: &TermId, to: &TermId) -> CoreResult<()> {
        let mut client = self.client.clone();
        let request = Request::new(proto::DeleteRelationshipRequest {
            from_term_id: from.as_str().to_string(),
            to_term_id: to.as_str().to_string(),
        });
        client
            .delete_relationship(request)
            .await
            .map_err(|status| core_from_status(&status))?;
        Ok(())
    }

    async fn purge_term(&self, id: &TermId) -> CoreResult<u64> {
        let mut client = self.client.clone();
        let request = Request::new(proto::PurgeTermRequest {
            term_id: id.as_str().to_string(),
        });
        let resp = client
            .purge_term(request)
            .await
            .map_err(|status| core_from_status(&status))?
            .into_inner();
        Ok(resp.removed)
    }
}
