//! gRPC service implementation for the gateway
//!
//! Term operations are thin proxies to the glossary authority; their
//! statuses pass through untouched. Relationship writes and the composed
//! reads go through the aggregation engine, which owns the consistency
//! rules (endpoint guard, orphan filtering, cascade purge).

use std::sync::Arc;

use tonic::transport::Channel;
use tonic::{Request, Response, Status};
use tracing::{debug, info};

use lexigraph_domain::{Relationship, TermId};
use lexigraph_engine::{AggregationEngine, TermSelector};
use lexigraph_grpc::conversions::{
    edge_to_proto, node_to_proto, relationship_to_proto, relationship_type_from_proto,
    term_to_proto,
};
use lexigraph_grpc::proto;
use lexigraph_grpc::proto::gateway_service_server::GatewayService;
use lexigraph_grpc::proto::glossary_service_client::GlossaryServiceClient;
use lexigraph_grpc::proto::graph_service_client::GraphServiceClient;
use lexigraph_grpc::status_from_core;

/// The composing front door over both authorities.
pub struct Gateway {
    glossary: GlossaryServiceClient<Channel>,
    graph: GraphServiceClient<Channel>,
    engine: Arc<AggregationEngine>,
}

impl Gateway {
    /// Build the gateway over client channels and a configured engine.
    ///
    /// The raw clients serve the proxied term operations and health; every
    /// relationship and composition path runs through the engine instead.
    pub fn new(
        glossary: GlossaryServiceClient<Channel>,
        graph: GraphServiceClient<Channel>,
        engine: Arc<AggregationEngine>,
    ) -> Self {
        Self {
            glossary,
            graph,
            engine,
        }
    }
}

fn selector_from_request(request: proto::GetEnrichedTermRequest) -> Result<TermSelector, Status> {
    use proto::get_enriched_term_request::Selector;
    match request.selector {
        Some(Selector::Id(id)) => Ok(TermSelector::ById(TermId::new(id))),
        Some(Selector::Name(name)) => Ok(TermSelector::ByName(name)),
        None => Err(Status::invalid_argument("a term id or name is required")),
    }
}

#[tonic::async_trait]
impl GatewayService for Gateway {
    async fn add_term(
        &self,
        request: Request<proto::AddTermRequest>,
    ) -> Result<Response<proto::Term>, Status> {
        self.glossary.clone().add_term(request).await
    }

    async fn get_term(
        &self,
        request: Request<proto::GetTermRequest>,
    ) -> Result<Response<proto::Term>, Status> {
        self.glossary.clone().get_term(request).await
    }

    async fn get_term_by_name(
        &self,
        request: Request<proto::GetTermByNameRequest>,
    ) -> Result<Response<proto::Term>, Status> {
        self.glossary.clone().get_term_by_name(request).await
    }

    async fn search_terms(
        &self,
        request: Request<proto::SearchTermsRequest>,
    ) -> Result<Response<proto::TermList>, Status> {
        self.glossary.clone().search_terms(request).await
    }

    async fn get_all_terms(
        &self,
        request: Request<proto::GetAllTermsRequest>,
    ) -> Result<Response<proto::TermList>, Status> {
        self.glossary.clone().get_all_terms(request).await
    }

    async fn update_term(
        &self,
        request: Request<proto::Term>,
    ) -> Result<Response<proto::Term>, Status> {
        self.glossary.clone().update_term(request).await
    }

    async fn delete_term(
        &self,
        request: Request<proto::DeleteTermRequest>,
    ) -> Result<Response<proto::GatewayDeleteTermResponse>, Status> {
        let req = request.into_inner();
        if req.id.is_empty() {
            return Err(Status::invalid_argument("term id is required"));
        }
        let id = TermId::new(req.id.clone());

        // The authority confirms the deletion before any cleanup starts; a
        // missing term propagates as NOT_FOUND with no purge.
        self.glossary.clone().delete_term(Request::new(req)).await?;
        let removed_relationships = self.engine.purge_after_term_delete(&id).await;

        info!(term_id = %id, removed_relationships, "term deleted");
        Ok(Response::new(proto::GatewayDeleteTermResponse {
            success: true,
            removed_relationships,
        }))
    }

    async fn add_relationship(
        &self,
        request: Request<proto::AddRelationshipRequest>,
    ) -> Result<Response<proto::AddRelationshipResponse>, Status> {
        let req = request.into_inner();
        let kind = relationship_type_from_proto(req.r#type)
            .map_err(|e| Status::invalid_argument(e.to_string()))?;

        let relationship = Relationship::new(
            TermId::new(req.from_term_id),
            TermId::new(req.to_term_id),
            kind,
        );
        self.engine
            .add_relationship(&relationship)
            .await
            .map_err(status_from_core)?;

        info!(
            from = %relationship.from,
            to = %relationship.to,
            kind = relationship.kind.as_str(),
            "relationship accepted"
        );
        Ok(Response::new(proto::AddRelationshipResponse {
            success: true,
            message: format!(
                "recorded {} -[{}]-> {}",
                relationship.from,
                relationship.kind.as_str(),
                relationship.to
            ),
        }))
    }

    async fn get_relationships_for_term(
        &self,
        request: Request<proto::GetRelationshipsForTermRequest>,
    ) -> Result<Response<proto::GetRelationshipsForTermResponse>, Status> {
        let req = request.into_inner();
        let relationships = self
            .engine
            .relationships_for_term(&TermId::new(req.term_id))
            .await
            .map_err(status_from_core)?;

        Ok(Response::new(proto::GetRelationshipsForTermResponse {
            relationships: relationships.into_iter().map(relationship_to_proto).collect(),
        }))
    }

    async fn delete_relationship(
        &self,
        request: Request<proto::DeleteRelationshipRequest>,
    ) -> Result<Response<proto::DeleteRelationshipResponse>, Status> {
        let req = request.into_inner();
        let from = TermId::new(req.from_term_id);
        let to = TermId::new(req.to_term_id);

        self.engine
            .delete_relationship(&from, &to)
            .await
            .map_err(status_from_core)?;

        info!(from = %from, to = %to, "relationship deleted");
        Ok(Response::new(proto::DeleteRelationshipResponse {
            success: true,
            message: "relationship deleted".to_string(),
        }))
    }

    async fn get_enriched_term(
        &self,
        request: Request<proto::GetEnrichedTermRequest>,
    ) -> Result<Response<proto::GetEnrichedTermResponse>, Status> {
        let selector = selector_from_request(request.into_inner())?;
        let enriched = self
            .engine
            .enriched_term(&selector)
            .await
            .map_err(status_from_core)?;

        debug!(
            term_id = %enriched.term.id,
            live_edges = enriched.relationships.len(),
            "enriched term composed"
        );
        Ok(Response::new(proto::GetEnrichedTermResponse {
            term: Some(term_to_proto(enriched.term)),
            relationships: enriched
                .relationships
                .into_iter()
                .map(relationship_to_proto)
                .collect(),
        }))
    }

    async fn get_mind_map_for_term(
        &self,
        request: Request<proto::GetMindMapForTermRequest>,
    ) -> Result<Response<proto::GetMindMapForTermResponse>, Status> {
        let req = request.into_inner();
        let map = self
            .engine
            .mind_map(&TermId::new(req.term_id))
            .await
            .map_err(status_from_core)?;

        debug!(
            nodes = map.nodes.len(),
            edges = map.edges.len(),
            "mind map composed"
        );
        Ok(Response::new(proto::GetMindMapForTermResponse {
            nodes: map.nodes.into_iter().map(node_to_proto).collect(),
            edges: map.edges.into_iter().map(edge_to_proto).collect(),
        }))
    }

    async fn health(
        &self,
        _request: Request<proto::GatewayHealthRequest>,
    ) -> Result<Response<proto::GatewayHealthResponse>, Status> {
        let mut glossary = self.glossary.clone();
        let mut graph = self.graph.clone();
        let (glossary_health, graph_health) = tokio::join!(
            async move {
                glossary
                    .health(Request::new(proto::GlossaryHealthRequest {}))
                    .await
            },
            async move {
                graph
                    .health(Request::new(proto::GraphHealthRequest {}))
                    .await
            },
        );

        let both_serving = glossary_health.is_ok() && graph_health.is_ok();
        let glossary = match glossary_health {
            Ok(resp) => format!("serving ({} terms)", resp.into_inner().term_count),
            Err(status) => format!("unreachable: {:?}", status.code()),
        };
        let graph = match graph_health {
            Ok(resp) => format!(
                "serving ({} relationships)",
                resp.into_inner().relationship_count
            ),
            Err(status) => format!("unreachable: {:?}", status.code()),
        };

        Ok(Response::new(proto::GatewayHealthResponse {
            status: if both_serving { "serving" } else { "degraded" }.to_string(),
            glossary,
            graph,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::{GrpcRelationshipGraph, GrpcTermLookup};

    // The composition semantics themselves are covered in lexigraph-engine
    // against in-memory ports; these tests pin the wire-facing plumbing
    // that the gateway adds on top.

    fn dead_channel() -> Channel {
        Channel::from_shared("http://127.0.0.1:9".to_string())
            .unwrap()
            .connect_lazy()
    }

    fn gateway_with_dead_upstreams() -> Gateway {
        let glossary_channel = dead_channel();
        let graph_channel = dead_channel();
        let engine = Arc::new(AggregationEngine::new(
            Arc::new(GrpcTermLookup::new(glossary_channel.clone())),
            Arc::new(GrpcRelationshipGraph::new(graph_channel.clone())),
        ));
        Gateway::new(
            GlossaryServiceClient::new(glossary_channel),
            GraphServiceClient::new(graph_channel),
            engine,
        )
    }

    #[test]
    fn test_selector_decoding() {
        use proto::get_enriched_term_request::Selector;

        let by_id = selector_from_request(proto::GetEnrichedTermRequest {
            selector: Some(Selector::Id("t1".to_string())),
        })
        .unwrap();
        assert_eq!(by_id, TermSelector::ById(TermId::new("t1")));

        let by_name = selector_from_request(proto::GetEnrichedTermRequest {
            selector: Some(Selector::Name("Docker".to_string())),
        })
        .unwrap();
        assert_eq!(by_name, TermSelector::ByName("Docker".to_string()));

        let err = selector_from_request(proto::GetEnrichedTermRequest { selector: None })
            .unwrap_err();
        assert_eq!(err.code(), tonic::Code::InvalidArgument);
    }

    #[tokio::test]
    async fn test_bad_relationship_kind_rejected_before_any_upstream_call() {
        let gateway = gateway_with_dead_upstreams();

        let err = gateway
            .add_relationship(Request::new(proto::AddRelationshipRequest {
                from_term_id: "a".to_string(),
                to_term_id: "b".to_string(),
                r#type: 0,
            }))
            .await
            .unwrap_err();
        // Upstreams are dead, so anything but a local rejection would have
        // been UNAVAILABLE.
        assert_eq!(err.code(), tonic::Code::InvalidArgument);
    }

    #[tokio::test]
    async fn test_term_proxy_propagates_unavailable() {
        let gateway = gateway_with_dead_upstreams();

        let err = gateway
            .get_term(Request::new(proto::GetTermRequest {
                id: "t1".to_string(),
            }))
            .await
            .unwrap_err();
        assert_eq!(err.code(), tonic::Code::Unavailable);
    }

    #[tokio::test]
    async fn test_health_degrades_when_upstreams_are_down() {
        let gateway = gateway_with_dead_upstreams();

        let health = gateway
            .health(Request::new(proto::GatewayHealthRequest {}))
            .await
            .unwrap()
            .into_inner();
        assert_eq!(health.status, "degraded");
        assert!(health.glossary.starts_with("unreachable"));
        assert!(health.graph.starts_with("unreachable"));
    }
}
