fn main() -> Result<(), Box<dyn std::error::Error>> {
    tonic_build::configure()
        .build_server(true)
        .build_client(true)
        .compile_protos(
            &[
                "proto/glossary.proto",
                "proto/graph.proto",
                "proto/gateway.proto",
            ],
            &["proto"],
        )?;

    println!("cargo:rerun-if-changed=proto/glossary.proto");
    println!("cargo:rerun-if-changed=proto/graph.proto");
    println!("cargo:rerun-if-changed=proto/gateway.proto");

    Ok(())
}
