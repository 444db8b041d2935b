//! gRPC service implementation for the glossary authority

use std::sync::Arc;

use tonic::{Request, Response, Status};
use tracing::{debug, info};

use lexigraph_domain::TermId;
use lexigraph_grpc::conversions::{term_from_proto, term_to_proto};
use lexigraph_grpc::proto;
use lexigraph_grpc::proto::glossary_service_server::GlossaryService;
use lexigraph_grpc::status_from_core;
use lexigraph_store::{StoreError, TermStore};

/// The term authority behind the GlossaryService wire contract.
pub struct GlossaryAuthority {
    store: Arc<TermStore>,
}

impl GlossaryAuthority {
    /// Create a new service instance over the given store.
    pub fn new(store: Arc<TermStore>) -> Self {
        Self { store }
    }
}

fn store_status(err: StoreError) -> Status {
    status_from_core(err.into())
}

#[tonic::async_trait]
impl GlossaryService for GlossaryAuthority {
    async fn add_term(
        &self,
        request: Request<proto::AddTermRequest>,
    ) -> Result<Response<proto::Term>, Status> {
        let req = request.into_inner();
        if req.name.is_empty() || req.definition.is_empty() {
            return Err(Status::invalid_argument("name and definition are required"));
        }

        let term = self
            .store
            .add_term(&req.name, &req.definition, req.source_url.as_deref())
            .map_err(store_status)?;

        info!(term_id = %term.id, name = %term.name, "term added");
        Ok(Response::new(term_to_proto(term)))
    }

    async fn get_term(
        &self,
        request: Request<proto::GetTermRequest>,
    ) -> Result<Response<proto::Term>, Status> {
        let req = request.into_inner();
        if req.id.is_empty() {
            return Err(Status::invalid_argument("term id is required"));
        }

        let id = TermId::new(req.id);
        let term = self
            .store
            .term_by_id(&id)
            .map_err(store_status)?
            .ok_or_else(|| Status::not_found(format!("term '{}' not found", id)))?;

        Ok(Response::new(term_to_proto(term)))
    }

    async fn get_term_by_name(
        &self,
        request: Request<proto::GetTermByNameRequest>,
    ) -> Result<Response<proto::Term>, Status> {
        let req = request.into_inner();
        if req.name.is_empty() {
            return Err(Status::invalid_argument("term name is required"));
        }

        let term = self
            .store
            .term_by_name(&req.name)
            .map_err(store_status)?
            .ok_or_else(|| Status::not_found(format!("term named '{}' not found", req.name)))?;

        Ok(Response::new(term_to_proto(term)))
    }

    async fn search_terms(
        &self,
        request: Request<proto::SearchTermsRequest>,
    ) -> Result<Response<proto::TermList>, Status> {
        let req = request.into_inner();
        let terms = self.store.search_terms(&req.query).map_err(store_status)?;

        debug!(query = %req.query, hits = terms.len(), "term search");
        Ok(Response::new(proto::TermList {
            terms: terms.into_iter().map(term_to_proto).collect(),
        }))
    }

    async fn get_all_terms(
        &self,
        _request: Request<proto::GetAllTermsRequest>,
    ) -> Result<Response<proto::TermList>, Status> {
        let terms = self.store.all_terms().map_err(store_status)?;

        Ok(Response::new(proto::TermList {
            terms: terms.into_iter().map(term_to_proto).collect(),
        }))
    }

    async fn update_term(
        &self,
        request: Request<proto::Term>,
    ) -> Result<Response<proto::Term>, Status> {
        let term = term_from_proto(request.into_inner())
            .map_err(|e| Status::invalid_argument(e.to_string()))?;

        let updated = self.store.update_term(&term).map_err(store_status)?;

        info!(term_id = %updated.id, name = %updated.name, "term updated");
        Ok(Response::new(term_to_proto(updated)))
    }

    async fn delete_term(
        &self,
        request: Request<proto::DeleteTermRequest>,
    ) -> Result<Response<proto::DeleteTermResponse>, Status> {
        let req = request.into_inner();
        if req.id.is_empty() {
            return Err(Status::invalid_argument("term id is required"));
        }

        let id = TermId::new(req.id);
        let removed = self.store.delete_term(&id).map_err(store_status)?;
        if !removed {
            return Err(Status::not_found(format!("term '{}' not found", id)));
        }

        info!(term_id = %id, "term deleted");
        Ok(Response::new(proto::DeleteTermResponse { success: true }))
    }

    async fn health(
        &self,
        _request: Request<proto::GlossaryHealthRequest>,
    ) -> Result<Response<proto::GlossaryHealthResponse>, Status> {
        let term_count = self.store.term_count().map_err(store_status)?;

        Ok(Response::new(proto::GlossaryHealthResponse {
            status: "serving".to_string(),
            term_count,
        }))
    }
}
