use std::env;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // tonic-build 需要 protoc；未显式指定时用 vendored 的版本
    if env::var_os("PROTOC").is_none() {
        env::set_var("PROTOC", protoc_bin_vendored::protoc_bin_path()?);
    }

    tonic_build::compile_protos("proto/logs.proto")?;

    Ok(())
}
