//! gRPC service implementation for the relationship authority

use std::sync::Arc;

use tonic::{Request, Response, Status};
use tracing::{debug, info};

use lexigraph_domain::{Relationship, TermId};
use lexigraph_grpc::conversions::{relationship_to_proto, relationship_type_from_proto};
use lexigraph_grpc::proto;
use lexigraph_grpc::proto::graph_service_server::GraphService;
use lexigraph_grpc::status_from_core;
use lexigraph_store::{GraphStore, StoreError};

/// The relationship authority behind the GraphService wire contract.
///
/// Endpoint ids are opaque here. Whether they name real glossary terms is
/// the gateway's concern; this service only owns edge identity and the
/// closed kind set.
pub struct GraphAuthority {
    store: Arc<GraphStore>,
}

impl GraphAuthority {
    /// Create a new service instance over the given store.
    pub fn new(store: Arc<GraphStore>) -> Self {
        Self { store }
    }
}

fn store_status(err: StoreError) -> Status {
    status_from_core(err.into())
}

#[tonic::async_trait]
impl GraphService for GraphAuthority {
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
        self.store
            .upsert_relationship(&relationship)
            .map_err(store_status)?;

        info!(
            from = %relationship.from,
            to = %relationship.to,
            kind = relationship.kind.as_str(),
            "relationship recorded"
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
        if req.term_id.is_empty() {
            return Err(Status::invalid_argument("term id is required"));
        }

        let id = TermId::new(req.term_id);
        let relationships = self.store.relationships_for_term(&id).map_err(store_status)?;

        debug!(term_id = %id, edges = relationships.len(), "relationship query");
        Ok(Response::new(proto::GetRelationshipsForTermResponse {
            relationships: relationships.into_iter().map(relationship_to_proto).collect(),
        }))
    }

    async fn delete_relationship(
        &self,
        request: Request<proto::DeleteRelationshipRequest>,
    ) -> Result<Response<proto::DeleteRelationshipResponse>, Status> {
        let req = request.into_inner();
        if req.from_term_id.is_empty() || req.to_term_id.is_empty() {
            return Err(Status::invalid_argument("both endpoint ids are required"));
        }

        let from = TermId::new(req.from_term_id);
        let to = TermId::new(req.to_term_id);
        let removed = self.store.remove_relationship(&from, &to).map_err(store_status)?;

        // Deleting an absent edge is still a success: the caller wanted it
        // gone and it is gone.
        let message = if removed {
            info!(from = %from, to = %to, "relationship deleted");
            "relationship deleted".to_string()
        } else {
            "no matching relationship".to_string()
        };
        Ok(Response::new(proto::DeleteRelationshipResponse {
            success: true,
            message,
        }))
    }

    async fn purge_term(
        &self,
        request: Request<proto::PurgeTermRequest>,
    ) -> Result<Response<proto::PurgeTermResponse>, Status> {
        let req = request.into_inner();
        if req.term_id.is_empty() {
            return Err(Status::invalid_argument("term id is required"));
        }

        let id = TermId::new(req.term_id);
        let removed = self.store.purge_edges_for_term(&id).map_err(store_status)?;

        info!(term_id = %id, removed, "term purged from graph");
        Ok(Response::new(proto::PurgeTermResponse { removed }))
    }

    async fn health(
        &self,
        _request: Request<proto::GraphHealthRequest>,
    ) -> Result<Response<proto::GraphHealthResponse>, Status> {
        let relationship_count = self.store.relationship_count().map_err(store_status)?;

        Ok(Response::new(proto::GraphHealthResponse {
            status: "serving".to_string(),
            relationship_count,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tonic::Code;

    fn authority() -> GraphAuthority {
        GraphAuthority::new(Arc::new(GraphStore::new(":memory:").unwrap()))
    }

    fn add_req(from: &str, to: &str, kind: proto::RelationshipType) -> Request<proto::AddRelationshipRequest> {
        Request::new(proto::AddRelationshipRequest {
            from_term_id: from.to_string(),
            to_term_id: to.to_string(),
            r#type: kind as i32,
        })
    }

    async fn edges_for(svc: &GraphAuthority, id: &str) -> Vec<proto::Relationship> {
        svc.get_relationships_for_term(Request::new(proto::GetRelationshipsForTermRequest {
            term_id: id.to_string(),
        }))
        .await
        .unwrap()
        .into_inner()
        .relationships
    }

    #[tokio::test]
    async fn test_add_and_list_relationships() {
        let svc = authority();

        let resp = svc
            .add_relationship(add_req("docker", "containerization", proto::RelationshipType::IsA))
            .await
            .unwrap()
            .into_inner();
        assert!(resp.success);

        let edges = edges_for(&svc, "docker").await;
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].from_term_id, "docker");
        assert_eq!(edges[0].to_term_id, "containerization");
        assert_eq!(edges[0].r#type, proto::RelationshipType::IsA as i32);
    }

    #[tokio::test]
    async fn test_add_same_pair_replaces_kind() {
        let svc = authority();

        svc.add_relationship(add_req("a", "b", proto::RelationshipType::RelatedTo))
            .await
            .unwrap();
        svc.add_relationship(add_req("a", "b", proto::RelationshipType::DependsOn))
            .await
            .unwrap();

        let edges = edges_for(&svc, "a").await;
        assert_eq!(edges.len(), 1, "same pair is one edge, not two");
        assert_eq!(edges[0].r#type, proto::RelationshipType::DependsOn as i32);
    }

    #[tokio::test]
    async fn test_unspecified_kind_is_invalid_argument() {
        let svc = authority();

        let err = svc
            .add_relationship(add_req("a", "b", proto::RelationshipType::Unspecified))
            .await
            .unwrap_err();
        assert_eq!(err.code(), Code::InvalidArgument);

        let err = svc
            .add_relationship(Request::new(proto::AddRelationshipRequest {
                from_term_id: "a".to_string(),
                to_term_id: "b".to_string(),
                r#type: 99,
            }))
            .await
            .unwrap_err();
        assert_eq!(err.code(), Code::InvalidArgument, "unknown tag");
    }

    #[tokio::test]
    async fn test_self_loop_and_blank_ids_rejected() {
        let svc = authority();

        let err = svc
            .add_relationship(add_req("a", "a", proto::RelationshipType::Synonym))
            .await
            .unwrap_err();
        assert_eq!(err.code(), Code::InvalidArgument);

        let err = svc
            .add_relationship(add_req("", "b", proto::RelationshipType::Synonym))
            .await
            .unwrap_err();
        assert_eq!(err.code(), Code::InvalidArgument);

        let err = svc
            .get_relationships_for_term(Request::new(proto::GetRelationshipsForTermRequest {
                term_id: String::new(),
            }))
            .await
            .unwrap_err();
        assert_eq!(err.code(), Code::InvalidArgument);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let svc = authority();

        svc.add_relationship(add_req("a", "b", proto::RelationshipType::RelatedTo))
            .await
            .unwrap();

        let del = |from: &str, to: &str| {
            Request::new(proto::DeleteRelationshipRequest {
                from_term_id: from.to_string(),
                to_term_id: to.to_string(),
            })
        };

        let first = svc.delete_relationship(del("a", "b")).await.unwrap().into_inner();
        assert!(first.success);
        assert_eq!(first.message, "relationship deleted");

        let second = svc.delete_relationship(del("a", "b")).await.unwrap().into_inner();
        assert!(second.success, "absent edge still deletes cleanly");
        assert_eq!(second.message, "no matching relationship");

        assert!(edges_for(&svc, "a").await.is_empty());
    }

    #[tokio::test]
    async fn test_delete_respects_direction() {
        let svc = authority();

        svc.add_relationship(add_req("a", "b", proto::RelationshipType::Contains))
            .await
            .unwrap();

        let resp = svc
            .delete_relationship(Request::new(proto::DeleteRelationshipRequest {
                from_term_id: "b".to_string(),
                to_term_id: "a".to_string(),
            }))
            .await
            .unwrap()
            .into_inner();
        assert_eq!(resp.message, "no matching relationship");
        assert_eq!(edges_for(&svc, "a").await.len(), 1);
    }

    #[tokio::test]
    async fn test_purge_term_removes_both_directions() {
        let svc = authority();

        svc.add_relationship(add_req("hub", "x", proto::RelationshipType::RelatedTo))
            .await
            .unwrap();
        svc.add_relationship(add_req("y", "hub", proto::RelationshipType::DependsOn))
            .await
            .unwrap();
        svc.add_relationship(add_req("x", "y", proto::RelationshipType::RelatedTo))
            .await
            .unwrap();

        let resp = svc
            .purge_term(Request::new(proto::PurgeTermRequest {
                term_id: "hub".to_string(),
            }))
            .await
            .unwrap()
            .into_inner();
        assert_eq!(resp.removed, 2);

        assert!(edges_for(&svc, "hub").await.is_empty());
        assert_eq!(edges_for(&svc, "x").await.len(), 1, "unrelated edge survives");
    }

    #[tokio::test]
    async fn test_health_reports_count() {
        let svc = authority();
        svc.add_relationship(add_req("a", "b", proto::RelationshipType::RelatedTo))
            .await
            .unwrap();

        let health = svc
            .health(Request::new(proto::GraphHealthRequest {}))
            .await
            .unwrap()
            .into_inner();
        assert_eq!(health.status, "serving");
        assert_eq!(health.relationship_count, 1);
    }
}
